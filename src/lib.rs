use std::path::{Path, PathBuf};

pub mod candidates;
pub mod error;
pub mod mojibake;
pub mod normalizer;
pub mod recovery;
pub mod transliteration;
pub mod types;

pub use candidates::CandidateGenerator;
pub use error::{Error, Result, UnsupportedNormalization};
pub use mojibake::MojibakeTable;
pub use normalizer::{NoNormalization, Normalizer, UnicodeNormalizer};
pub use transliteration::DiacriticStripper;
pub use types::*;

#[derive(Debug, Clone)]
pub struct Config {
    pub sanitize_special_chars: bool,
    pub lowercase: bool,
    pub builtin_rules: bool,
    pub extra_rules: Vec<MojibakeRule>,
    pub rules_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            sanitize_special_chars: true,
            lowercase: true,
            builtin_rules: true,
            extra_rules: Vec::new(),
            rules_file: None,
        }
    }

    pub fn sanitize_special_chars(mut self, enabled: bool) -> Self {
        self.sanitize_special_chars = enabled;
        self
    }

    pub fn lowercase(mut self, enabled: bool) -> Self {
        self.lowercase = enabled;
        self
    }

    pub fn builtin_rules(mut self, enabled: bool) -> Self {
        self.builtin_rules = enabled;
        self
    }

    pub fn extra_rules(mut self, rules: Vec<MojibakeRule>) -> Self {
        self.extra_rules.extend(rules);
        self
    }

    pub fn rules_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_file = Some(path.into());
        self
    }
}

/// Sanitizes upload names and repairs files stored under mojibake names.
///
/// Holds no mutable state once built, so one value can serve any number of
/// threads when its normalizer allows it.
#[derive(Debug, Clone)]
pub struct FilenameRescuer<N: Normalizer> {
    normalizer: N,
    stripper: DiacriticStripper,
    table: MojibakeTable,
    lowercase: bool,
}

impl<N: Normalizer> FilenameRescuer<N> {
    pub fn new(normalizer: N, stripper: DiacriticStripper, table: MojibakeTable) -> Self {
        Self {
            normalizer,
            stripper,
            table,
            lowercase: false,
        }
    }

    pub fn table(&self) -> &MojibakeTable {
        &self.table
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn strip_accents(&self, path: &str) -> String {
        self.stripper.strip_accents(&self.normalizer, path)
    }

    /// The name to store an upload under. Lowercases the basename when
    /// configured; the directory is left alone.
    pub fn sanitize_filename(&self, path: &str) -> String {
        let stripped = Filename::parse(&self.strip_accents(path));
        if self.lowercase {
            let lowered = stripped.basename.to_lowercase();
            stripped.with_basename(lowered).to_path_string()
        } else {
            stripped.to_path_string()
        }
    }

    pub fn candidates_for(&self, target_basename: &str) -> Vec<String> {
        self.generator().candidates_for(target_basename)
    }

    pub fn recover(
        &self,
        old_path_guess: impl AsRef<Path>,
        new_path: impl AsRef<Path>,
    ) -> Result<RecoveryResult> {
        recovery::recover(
            &self.generator(),
            old_path_guess.as_ref(),
            new_path.as_ref(),
        )
    }

    /// Reverses double encoding in arbitrary text, e.g. a stored file name.
    pub fn repair_text(&self, text: &str) -> String {
        self.table.repair(text)
    }

    fn generator(&self) -> CandidateGenerator<'_, N> {
        CandidateGenerator::new(&self.normalizer, &self.table)
    }
}

/// Builds the rule table (builtin rules, then the rules file, then the
/// extra rules) and the stripper described by `config`.
pub fn build<N: Normalizer>(config: Config, normalizer: N) -> Result<FilenameRescuer<N>> {
    let mut table = if config.builtin_rules {
        MojibakeTable::builtin()
    } else {
        MojibakeTable::empty()
    };
    if let Some(path) = &config.rules_file {
        table = table.extend(MojibakeTable::load_rules(path)?);
    }
    table = table.extend(config.extra_rules);

    let stripper = DiacriticStripper::new(config.sanitize_special_chars)?;

    let mut rescuer = FilenameRescuer::new(normalizer, stripper, table);
    rescuer.lowercase = config.lowercase;
    Ok(rescuer)
}
