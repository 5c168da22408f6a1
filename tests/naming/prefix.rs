#[cfg(test)]
mod stripping {
    use formset::error::FormsetError;
    use formset::naming::{strip_trailing_index, Prefix};

    #[test]
    fn single_separator_is_kept() {
        assert_eq!(strip_trailing_index("choices_3"), Ok("choices_3"));
        assert_eq!(strip_trailing_index("choices"), Ok("choices"));
        assert_eq!(strip_trailing_index("fields_formset"), Ok("fields_formset"));
    }

    #[test]
    fn trailing_index_is_removed() {
        assert_eq!(strip_trailing_index("field_choices_3"), Ok("field_choices"));
        assert_eq!(
            strip_trailing_index("choices_formset_12"),
            Ok("choices_formset")
        );
        assert_eq!(strip_trailing_index("a_b_c_0"), Ok("a_b_c"));
    }

    #[test]
    fn ambiguous_without_index() {
        assert_eq!(
            strip_trailing_index("my_choices_set"),
            Err(FormsetError::PrefixAmbiguity {
                prefix: "my_choices_set".to_string()
            })
        );
        assert!(strip_trailing_index("choices_formset_")
            .is_err());
    }

    #[test]
    fn parsing_prefixes() {
        assert_eq!(
            Prefix::parse("fields_formset", false),
            Ok(Prefix::new("fields_formset"))
        );
        assert_eq!(
            Prefix::parse("choices_formset_3", true),
            Ok(Prefix::nested("choices_formset", 3))
        );
        // structural parsing does not depend on how many separators the
        // base has
        assert_eq!(
            Prefix::parse("choices_3", true),
            Ok(Prefix::nested("choices", 3))
        );
    }

    #[test]
    fn nested_prefix_needs_an_owner() {
        assert!(matches!(
            Prefix::parse("choices", true),
            Err(FormsetError::PrefixAmbiguity { .. })
        ));
        assert!(matches!(
            Prefix::parse("choices_formset_x", true),
            Err(FormsetError::PrefixAmbiguity { .. })
        ));
        assert!(matches!(
            Prefix::parse("fields-formset", false),
            Err(FormsetError::PatternMismatch { .. })
        ));
        assert!(Prefix::parse("", false).is_err());
    }

    #[test]
    fn rendering_prefixes() {
        assert_eq!(Prefix::new("fields_formset").to_string(), "fields_formset");
        assert_eq!(
            Prefix::nested("choices_formset", 0).to_string(),
            "choices_formset_0"
        );
    }
}
