#[cfg(test)]
mod summaries {
    use std::path::Path;

    use formset::document::{self, Form};
    use formset::engine::{Command, GroupManager};
    use formset::report;
    use formset::settings::Settings;

    fn sample() -> Form {
        let filename = Path::new("tests/samples/creator.json");
        let content = document::load(filename).expect("Failed to load sample");
        let page = document::read(filename, &content).expect("Failed to read sample");
        Form::from_page(&page).unwrap()
    }

    #[test]
    fn groups_of_the_sample() {
        let text = report::groups(&sample()).unwrap();

        assert_eq!(
            text,
            "fields_formset: counter 2, 2 present\n\
             choices_formset_0: counter 2, 2 present\n\
             choices_formset_1: counter 1, 1 present, hidden\n"
        );
    }

    #[test]
    fn applied_commands() {
        let mut manager = GroupManager::new(sample(), Settings::default());
        let mut outcomes = Vec::new();
        for text in ["add-field", "add-choice:0", "type:0=input"] {
            let command = text
                .parse::<Command>()
                .unwrap();
            outcomes.push(
                manager
                    .apply(&command)
                    .unwrap(),
            );
        }

        let text = report::outcomes(&outcomes).unwrap();

        assert_eq!(
            text,
            "add-field fields_formset: index 2, counter 3\n\
             add-choice choices_formset_0: index 2, counter 3\n\
             type-changed choices_formset_0: index 0, counter 3, 2 discarded\n"
        );
    }
}
