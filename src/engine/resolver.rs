use crate::document::{Form, Group};
use crate::error::FormsetError;
use crate::naming::SEPARATOR;

/// Where an interaction happened, in terms of the form's structure. This
/// stands in for "some element inside a group" such as a clicked button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// The list of fields itself, e.g. its "add field" control.
    Fields,
    /// Anything inside field `n` outside of its choices.
    Field(usize),
    /// The choices list of field `n`, e.g. its "add choice" control.
    Choices(usize),
    /// Choice `m` of field `n`.
    Choice(usize, usize),
}

/// The nearest group enclosing `address`.
pub fn enclosing_group(form: &Form, address: Address) -> Result<&Group, FormsetError> {
    let field = move |n: usize| {
        form.fields
            .items
            .get(n)
            .ok_or_else(|| FormsetError::NotFound {
                what: "field",
                key: format!("{}[{}]", form.fields.prefix, n),
            })
    };
    let choices = move |n: usize| {
        field(n)?
            .nested
            .as_ref()
            .ok_or_else(|| FormsetError::NotFound {
                what: "choice group",
                key: format!("{}[{}]", form.fields.prefix, n),
            })
    };

    match address {
        Address::Fields => Ok(&form.fields),
        Address::Field(n) => field(n).map(|_| &form.fields),
        Address::Choices(n) => choices(n),
        Address::Choice(n, m) => {
            let group = choices(n)?;
            if m < group
                .items
                .len()
            {
                Ok(group)
            } else {
                Err(FormsetError::NotFound {
                    what: "choice",
                    key: format!("{}[{}]", group.prefix, m),
                })
            }
        }
    }
}

/// Find the group enclosing `address` and return the prefix encoded in its
/// counter's name, that is everything before the first `-`.
pub fn resolve_group_prefix(form: &Form, address: Address) -> Result<String, FormsetError> {
    let group = enclosing_group(form, address)?;
    let counter = group
        .counter_name()
        .to_string();
    match counter.split_once(SEPARATOR) {
        Some((prefix, _)) => Ok(prefix.to_string()),
        None => Err(FormsetError::PatternMismatch {
            name: counter,
            expected: "<prefix>-TOTAL_FORMS".to_string(),
        }),
    }
}
