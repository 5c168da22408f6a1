//! Plain text summaries of a form and of the commands applied to it

use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::document::Form;
use crate::engine::Outcome;

static GROUPS: &str = "{{ for group in groups }}{group.prefix}: counter {group.count}, {group.present} present{{ if group.hidden }}, hidden{{ endif }}\n{{ endfor }}";

static OUTCOMES: &str = "{{ for outcome in outcomes }}{outcome.action} {outcome.group}: index {outcome.index}, counter {outcome.count}{{ if outcome.lossy }}, {outcome.discarded} discarded{{ endif }}\n{{ endfor }}";

#[derive(Serialize)]
struct GroupLine {
    prefix: String,
    count: i64,
    present: usize,
    hidden: bool,
}

#[derive(Serialize)]
struct GroupsContext {
    groups: Vec<GroupLine>,
}

#[derive(Serialize)]
struct OutcomeLine {
    action: String,
    group: String,
    index: usize,
    count: i64,
    lossy: bool,
    discarded: usize,
}

#[derive(Serialize)]
struct OutcomesContext {
    outcomes: Vec<OutcomeLine>,
}

fn templates() -> Result<TinyTemplate<'static>, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("groups", GROUPS)?;
    tt.add_template("outcomes", OUTCOMES)?;
    Ok(tt)
}

/// One line per group: its prefix, counter, and how many items it holds.
pub fn groups(form: &Form) -> Result<String, tinytemplate::error::Error> {
    let context = GroupsContext {
        groups: form
            .groups()
            .into_iter()
            .map(|group| GroupLine {
                prefix: group
                    .prefix
                    .to_string(),
                count: group.total(),
                present: group
                    .items
                    .len(),
                hidden: group.hidden,
            })
            .collect(),
    };
    templates()?.render("groups", &context)
}

/// One line per applied command.
pub fn outcomes(outcomes: &[Outcome]) -> Result<String, tinytemplate::error::Error> {
    let context = OutcomesContext {
        outcomes: outcomes
            .iter()
            .map(|outcome| OutcomeLine {
                action: outcome
                    .action
                    .to_string(),
                group: outcome
                    .group
                    .clone(),
                index: outcome.index,
                count: outcome.count,
                lossy: outcome.discarded > 0,
                discarded: outcome.discarded,
            })
            .collect(),
    };
    templates()?.render("outcomes", &context)
}
