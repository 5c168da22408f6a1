#[cfg(test)]
mod counters {
    use formset::engine::{index_for, CounterStore};
    use formset::error::FormsetError;

    use crate::fixture::{form, CHOICES, FIELDS};

    #[test]
    fn reading_counters() {
        let form = form(&[("select", 3), ("input", 1)]);

        assert_eq!(form.get(FIELDS), Ok(2));
        assert_eq!(form.get(&format!("{}_0", CHOICES)), Ok(3));
        assert_eq!(form.get(&format!("{}_1", CHOICES)), Ok(1));
    }

    #[test]
    fn adjusting_counters() {
        let mut form = form(&[("select", 2)]);
        let prefix = format!("{}_0", CHOICES);

        assert_eq!(form.increment(&prefix), Ok(3));
        assert_eq!(form.increment(&prefix), Ok(4));
        assert_eq!(form.decrement(&prefix), Ok(3));
        assert_eq!(form.set(&prefix, 7), Ok(7));
        assert_eq!(form.get(&prefix), Ok(7));

        // other groups are left alone
        assert_eq!(form.get(FIELDS), Ok(1));
    }

    #[test]
    fn decrement_below_zero_is_permitted() {
        let mut form = form(&[("input", 0)]);
        let prefix = format!("{}_0", CHOICES);

        assert_eq!(form.decrement(&prefix), Ok(-1));
        assert_eq!(form.get(&prefix), Ok(-1));
    }

    #[test]
    fn missing_counter() {
        let mut form = form(&[("input", 1)]);

        assert_eq!(
            form.get("nonexistent"),
            Err(FormsetError::NotFound {
                what: "counter",
                key: "id_nonexistent-TOTAL_FORMS".to_string()
            })
        );
        assert!(form
            .increment(&format!("{}_5", CHOICES))
            .is_err());
        assert!(form
            .set("fields", 3)
            .is_err());
    }

    #[test]
    fn index_from_count() {
        assert_eq!(index_for(FIELDS, 3), Ok(2));
        assert_eq!(index_for(FIELDS, 1), Ok(0));
        assert!(matches!(
            index_for(FIELDS, 0),
            Err(FormsetError::InvalidCount { .. })
        ));
    }
}
