use crate::error::UnsupportedNormalization;
use crate::types::NormalizationForm;
use unicode_normalization::{
    IsNormalized, UnicodeNormalization, is_nfc_quick, is_nfd_quick,
};

/// Canonical composition and decomposition of text.
pub trait Normalizer {
    fn normalize(
        &self,
        input: &str,
        form: NormalizationForm,
    ) -> Result<String, UnsupportedNormalization>;

    fn is_normalized_as(
        &self,
        input: &str,
        form: NormalizationForm,
    ) -> Result<bool, UnsupportedNormalization>;

    /// Decomposed wins when the input qualifies as both (plain ASCII does).
    fn detect_form(&self, input: &str) -> NormalizationForm {
        match self.is_normalized_as(input, NormalizationForm::Decomposed) {
            Ok(true) => NormalizationForm::Decomposed,
            Ok(false) => match self.is_normalized_as(input, NormalizationForm::Composed) {
                Ok(true) => NormalizationForm::Composed,
                _ => NormalizationForm::Unspecified,
            },
            Err(_) => NormalizationForm::Unspecified,
        }
    }
}

/// Normalizer backed by the Unicode tables of `unicode-normalization`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNormalizer;

impl Normalizer for UnicodeNormalizer {
    fn normalize(
        &self,
        input: &str,
        form: NormalizationForm,
    ) -> Result<String, UnsupportedNormalization> {
        Ok(match form {
            NormalizationForm::Composed => input.nfc().collect(),
            NormalizationForm::Decomposed => input.nfd().collect(),
            NormalizationForm::Unspecified => input.to_string(),
        })
    }

    fn is_normalized_as(
        &self,
        input: &str,
        form: NormalizationForm,
    ) -> Result<bool, UnsupportedNormalization> {
        let quick = match form {
            NormalizationForm::Composed => is_nfc_quick(input.chars()),
            NormalizationForm::Decomposed => is_nfd_quick(input.chars()),
            NormalizationForm::Unspecified => return Ok(true),
        };
        Ok(match quick {
            IsNormalized::Yes => true,
            IsNormalized::No => false,
            IsNormalized::Maybe => self.normalize(input, form)? == input,
        })
    }
}

/// Stand-in for a host without normalization support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNormalization;

impl Normalizer for NoNormalization {
    fn normalize(
        &self,
        _input: &str,
        _form: NormalizationForm,
    ) -> Result<String, UnsupportedNormalization> {
        Err(UnsupportedNormalization)
    }

    fn is_normalized_as(
        &self,
        _input: &str,
        _form: NormalizationForm,
    ) -> Result<bool, UnsupportedNormalization> {
        Err(UnsupportedNormalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSED: &str = "K\u{e4}rk\u{f6}lampi";
    const DECOMPOSED: &str = "Ka\u{308}rko\u{308}lampi";

    #[test]
    fn test_normalize_round_trip() {
        let n = UnicodeNormalizer;
        assert_eq!(
            n.normalize(COMPOSED, NormalizationForm::Decomposed).unwrap(),
            DECOMPOSED
        );
        assert_eq!(
            n.normalize(DECOMPOSED, NormalizationForm::Composed).unwrap(),
            COMPOSED
        );
        assert_eq!(
            n.normalize(DECOMPOSED, NormalizationForm::Unspecified).unwrap(),
            DECOMPOSED
        );
    }

    #[test]
    fn test_detect_form() {
        let n = UnicodeNormalizer;
        assert_eq!(n.detect_form(COMPOSED), NormalizationForm::Composed);
        assert_eq!(n.detect_form(DECOMPOSED), NormalizationForm::Decomposed);
        assert_eq!(n.detect_form("plain.txt"), NormalizationForm::Decomposed);
        // composed ä followed by a decomposed ö is in neither form
        let mixed = "\u{e4}o\u{308}";
        assert_eq!(n.detect_form(mixed), NormalizationForm::Unspecified);
    }

    #[test]
    fn test_no_normalization_reports_unsupported() {
        let n = NoNormalization;
        assert_eq!(
            n.normalize(COMPOSED, NormalizationForm::Composed),
            Err(UnsupportedNormalization)
        );
        assert_eq!(n.detect_form(COMPOSED), NormalizationForm::Unspecified);
    }
}
