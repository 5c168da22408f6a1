#[cfg(test)]
mod records {
    use std::path::Path;

    use formset::document::{self, Form};
    use formset::engine::{Address, Command, GroupManager};
    use formset::error::FormsetError;
    use formset::records::FormData;
    use formset::settings::Settings;

    fn sample() -> Form {
        let filename = Path::new("tests/samples/creator.json");
        let content = document::load(filename).expect("Failed to load sample");
        let page = document::read(filename, &content).expect("Failed to read sample");
        Form::from_page(&page).unwrap()
    }

    #[test]
    fn decoding_fields_and_choices() {
        let settings = Settings::default();
        let data = FormData::new(sample().form_data());

        let fields = data
            .field_records(&settings)
            .unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind(&settings), Some("select"));
        assert_eq!(fields[0].values["name"], "Colour");
        assert_eq!(fields[0].values["required"], "on");
        let names: Vec<&str> = fields[0]
            .choices
            .iter()
            .map(|choice| choice["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Red", "Blue"]);

        assert_eq!(fields[1].kind(&settings), Some("input"));
        assert!(!fields[1]
            .values
            .contains_key("required"));
    }

    #[test]
    fn records_after_editing() {
        let settings = Settings::default();
        let mut manager = GroupManager::new(sample(), settings.clone());
        manager
            .apply(&Command::AddChoice {
                source: Address::Choices(0),
            })
            .unwrap();
        manager
            .apply(&Command::AddField {
                source: Address::Fields,
            })
            .unwrap();

        let data = FormData::new(
            manager
                .form()
                .form_data(),
        );
        let fields = data
            .field_records(&settings)
            .unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].choices.len(), 3);
        assert_eq!(fields[0].choices[2]["name"], "");
        assert_eq!(fields[2].index, 2);
        assert_eq!(fields[2].choices.len(), 1);
    }

    #[test]
    fn discarded_choices_still_counted() {
        let settings = Settings::default();
        let mut manager = GroupManager::new(sample(), settings.clone());
        manager
            .apply(&Command::TypeChanged {
                field: 0,
                kind: "textarea".to_string(),
            })
            .unwrap();

        let data = FormData::new(
            manager
                .form()
                .form_data(),
        );

        // the counter still says two, but only one choice was submitted
        let choices = data
            .records("choices_formset_0")
            .unwrap();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0]["name"], "");
        assert!(choices[1].is_empty());
    }

    #[test]
    fn missing_counter() {
        let data = FormData::new(vec![(
            "fields_formset-0-name".to_string(),
            "Colour".to_string(),
        )]);

        assert!(matches!(
            data.records("fields_formset"),
            Err(FormsetError::NotFound { .. })
        ));
    }

    #[test]
    fn values_beyond_the_counter_are_ignored() {
        let data = FormData::from(vec![
            ("fields_formset-TOTAL_FORMS".to_string(), "1".to_string()),
            ("fields_formset-0-name".to_string(), "Colour".to_string()),
            ("fields_formset-1-name".to_string(), "Size".to_string()),
            ("fields_formset_x-0-name".to_string(), "Other".to_string()),
        ]);

        let records = data
            .records("fields_formset")
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Colour");
    }

    #[test]
    fn counter_above_the_absolute_maximum() {
        let data = FormData::new(vec![(
            "fields_formset-TOTAL_FORMS".to_string(),
            "100000000000".to_string(),
        )]);

        assert_eq!(
            data.records("fields_formset"),
            Err(FormsetError::InvalidCount {
                prefix: "fields_formset".to_string(),
                value: "100000000000".to_string(),
            })
        );
    }

    #[test]
    fn absolute_maximum_follows_the_submitted_maximum() {
        let data = FormData::new(vec![
            ("fields_formset-TOTAL_FORMS".to_string(), "1006".to_string()),
            ("fields_formset-MAX_NUM_FORMS".to_string(), "5".to_string()),
        ]);
        assert!(matches!(
            data.total("fields_formset"),
            Err(FormsetError::InvalidCount { .. })
        ));

        let data = FormData::new(vec![
            ("fields_formset-TOTAL_FORMS".to_string(), "1005".to_string()),
            ("fields_formset-MAX_NUM_FORMS".to_string(), "5".to_string()),
        ]);
        assert_eq!(data.total("fields_formset"), Ok(1005));
    }
}
