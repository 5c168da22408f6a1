#[cfg(test)]
mod templates {
    use formset::document::Control;
    use formset::engine::{GroupManager, TemplateCache};
    use formset::settings::Settings;

    use crate::fixture::form;

    #[test]
    fn capture_clears_values() {
        let form = form(&[("select", 2), ("input", 1)]);
        let cache = TemplateCache::capture(&form);

        let field = cache
            .field()
            .unwrap();
        assert_eq!(field.value("name"), Some(""));
        assert_eq!(field.value("required"), None);
        assert_eq!(field.value("type"), None);

        let choice = cache
            .choice()
            .unwrap();
        assert_eq!(choice.value("name"), Some(""));
    }

    #[test]
    fn capture_leaves_the_form_alone() {
        let form = form(&[("select", 2)]);
        let before = form.clone();

        let _ = TemplateCache::capture(&form);

        assert_eq!(form, before);
        assert_eq!(form.fields.items[0].value("name"), Some("Field 0"));
    }

    #[test]
    fn first_choice_in_document_order() {
        // the first field has no choices, so the second field's first is used
        let form = form(&[("input", 0), ("select", 2)]);
        let cache = TemplateCache::capture(&form);

        let choice = cache
            .choice()
            .unwrap();
        let name = choice
            .controls
            .iter()
            .find(|control| !matches!(control, Control::Label { .. }))
            .unwrap()
            .name();
        assert_eq!(name.to_string(), "choices_formset_1-0-name");
    }

    #[test]
    fn nothing_to_capture() {
        let form = form(&[]);
        let cache = TemplateCache::capture(&form);

        assert!(cache
            .field()
            .is_none());
        assert!(cache
            .choice()
            .is_none());
    }

    #[test]
    fn session_keeps_its_templates() {
        let form = form(&[("select", 2)]);
        let expected = TemplateCache::capture(&form);
        let mut manager = GroupManager::new(form, Settings::default());

        manager
            .apply(&formset::engine::Command::AddField {
                source: formset::engine::Address::Fields,
            })
            .unwrap();

        // captured once, when the session started
        assert_eq!(manager.templates(), &expected);
    }
}
