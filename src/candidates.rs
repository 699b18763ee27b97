use crate::mojibake::MojibakeTable;
use crate::normalizer::Normalizer;
use crate::types::NormalizationForm;

/// Guesses the names a file may have on disk when its correct name is known.
///
/// The list is ordered with the most likely original first and is never
/// empty. Selecting the normalization variant from the detected form of the
/// target is a heuristic: a name in neither canonical form only gets the
/// corrupted rendering.
pub struct CandidateGenerator<'a, N: Normalizer> {
    normalizer: &'a N,
    table: &'a MojibakeTable,
}

impl<'a, N: Normalizer> CandidateGenerator<'a, N> {
    pub fn new(normalizer: &'a N, table: &'a MojibakeTable) -> Self {
        Self { normalizer, table }
    }

    pub fn candidates_for(&self, target: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(2);

        let form = self.normalizer.detect_form(target);
        let alternate = match form {
            NormalizationForm::Decomposed => Some(NormalizationForm::Composed),
            NormalizationForm::Composed => Some(NormalizationForm::Decomposed),
            NormalizationForm::Unspecified => None,
        };
        if let Some(alternate) = alternate
            && let Ok(renormalized) = self.normalizer.normalize(target, alternate)
        {
            candidates.push(renormalized);
        }

        candidates.push(self.table.corrupt(target, form, self.normalizer));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{NoNormalization, UnicodeNormalizer};
    use crate::types::MojibakeRule;

    #[test]
    fn test_composed_target() {
        let table = MojibakeTable::builtin();
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        assert_eq!(
            generator.candidates_for("ääkkönen.png"),
            vec![
                "a\u{308}a\u{308}kko\u{308}nen.png".to_string(),
                "Ã¤Ã¤kkÃ¶nen.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_decomposed_target() {
        let table = MojibakeTable::builtin();
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        assert_eq!(
            generator.candidates_for("Cafe\u{301}.jpg"),
            vec!["Café.jpg".to_string(), "CafÃ©.jpg".to_string()]
        );
    }

    #[test]
    fn test_mixed_form_target_only_gets_corruption() {
        let table = MojibakeTable::builtin();
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        let candidates = generator.candidates_for("\u{e4}o\u{308}.txt");
        assert_eq!(candidates, vec!["Ã¤o\u{308}.txt".to_string()]);
    }

    #[test]
    fn test_ascii_target_is_not_deduplicated() {
        let table = MojibakeTable::builtin();
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        assert_eq!(
            generator.candidates_for("plain.txt"),
            vec!["plain.txt".to_string(), "plain.txt".to_string()]
        );
    }

    #[test]
    fn test_deterministic() {
        let table = MojibakeTable::builtin().extend(vec![MojibakeRule::new("Ã¶Ã¶", "öö")]);
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        let first = generator.candidates_for("Töölö – Åbo.png");
        for _ in 0..5 {
            assert_eq!(generator.candidates_for("Töölö – Åbo.png"), first);
        }
        assert_eq!(first[1], "TÃ¶Ã¶lÃ¶ â€“ Ã…bo.png");
    }

    #[test]
    fn test_empty_table() {
        let table = MojibakeTable::empty();
        let generator = CandidateGenerator::new(&UnicodeNormalizer, &table);
        assert_eq!(
            generator.candidates_for("ö.txt"),
            vec!["o\u{308}.txt".to_string(), "ö.txt".to_string()]
        );

        let bare = CandidateGenerator::new(&NoNormalization, &table);
        assert_eq!(bare.candidates_for("ö.txt"), vec!["ö.txt".to_string()]);
    }

    #[test]
    fn test_unsupported_normalization() {
        let table = MojibakeTable::builtin();
        let generator = CandidateGenerator::new(&NoNormalization, &table);
        assert_eq!(
            generator.candidates_for("ääkkönen.png"),
            vec!["Ã¤Ã¤kkÃ¶nen.png".to_string()]
        );
    }
}
