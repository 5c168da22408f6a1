#[cfg(test)]
mod submission {
    use std::path::Path;

    use formset::document::{self, Form};
    use formset::engine::{Address, Command, GroupManager};
    use formset::settings::Settings;

    fn sample() -> Form {
        let filename = Path::new("tests/samples/creator.json");
        let content = document::load(filename).expect("Failed to load sample");
        let page = document::read(filename, &content).expect("Failed to read sample");
        Form::from_page(&page).unwrap()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn form_data_in_document_order() {
        let form = sample();

        let data = form.form_data();

        assert_eq!(
            data[..12],
            pairs(&[
                ("fields_formset-TOTAL_FORMS", "2"),
                ("fields_formset-INITIAL_FORMS", "0"),
                ("fields_formset-MIN_NUM_FORMS", "0"),
                ("fields_formset-MAX_NUM_FORMS", "1000"),
                ("fields_formset-0-type", "select"),
                ("fields_formset-0-name", "Colour"),
                ("fields_formset-0-description", "Pick one"),
                ("fields_formset-0-required", "on"),
                ("fields_formset-0-id", ""),
                ("choices_formset_0-TOTAL_FORMS", "2"),
                ("choices_formset_0-INITIAL_FORMS", "0"),
                ("choices_formset_0-MIN_NUM_FORMS", "0"),
            ])[..]
        );
    }

    #[test]
    fn unchecked_boxes_are_not_submitted() {
        let form = sample();

        let data = form.form_data();

        assert!(!data
            .iter()
            .any(|(name, _)| name == "fields_formset-1-required"));
        // hidden groups are still submitted
        assert!(data
            .iter()
            .any(|(name, _)| name == "choices_formset_1-0-name"));
    }

    #[test]
    fn added_field_is_submitted() {
        let mut manager = GroupManager::new(sample(), Settings::default());
        manager
            .apply(&Command::AddField {
                source: Address::Fields,
            })
            .unwrap();

        let data = manager
            .form()
            .form_data();

        let find = |key: &str| {
            data.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(find("fields_formset-TOTAL_FORMS"), Some("3"));
        assert_eq!(find("fields_formset-2-name"), Some(""));
        assert_eq!(find("fields_formset-2-type"), None);
        assert_eq!(find("choices_formset_2-TOTAL_FORMS"), Some("1"));
        assert_eq!(find("choices_formset_2-0-name"), Some(""));
    }
}
