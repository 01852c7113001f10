//! Testing harness for the stylesheet fixtures
//!
//! A fixture is a `<name>.css` input with the expected output in `<name>.expect.css`. Options
//! for the transform can be given in an optional `<name>.json`.
use anyhow::{Context, Result};
use fg_gradient::{process_str, ProcessedStylesheet, TransformOptions};
use fg_shared::errors::CssResult;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const FIXTURE_ROOT: &str = "./tests/data/fixtures";

const INPUT_EXTENSION: &str = ".css";
const EXPECT_EXTENSION: &str = ".expect.css";
const OPTIONS_EXTENSION: &str = ".json";

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub name: String,
    pub input: String,
    pub expected: String,
    pub options: TransformOptions,
}

impl Fixture {
    /// Loads the fixture with the given name from the fixture root
    pub fn load(name: &str) -> Result<Self> {
        Self::load_from(Path::new(FIXTURE_ROOT), name)
    }

    pub fn load_from(root: &Path, name: &str) -> Result<Self> {
        let path = |extension: &str| root.join(format!("{name}{extension}"));

        let input = fs::read_to_string(path(INPUT_EXTENSION))
            .with_context(|| format!("reading input of fixture {name}"))?;
        let expected = fs::read_to_string(path(EXPECT_EXTENSION))
            .with_context(|| format!("reading expectation of fixture {name}"))?;

        let options_path = path(OPTIONS_EXTENSION);
        let options = if options_path.exists() {
            TransformOptions::from_file(&options_path)?
        } else {
            TransformOptions::default()
        };

        Ok(Self {
            name: name.to_string(),
            input,
            expected,
            options,
        })
    }

    /// Runs the transform on the input of the fixture
    pub fn process(&self) -> CssResult<ProcessedStylesheet> {
        process_str(&self.input, &self.options)
    }
}

/// Names of all fixtures below the fixture root, sorted
pub fn fixture_names() -> Vec<String> {
    let root = PathBuf::from(FIXTURE_ROOT);

    let mut names: Vec<String> = WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(&root).ok()?.to_str()?.to_string();
            if relative.ends_with(EXPECT_EXTENSION) {
                return None;
            }
            relative.strip_suffix(INPUT_EXTENSION).map(str::to_string)
        })
        .collect();

    names.sort();
    names
}

/// All fixtures that could be loaded
pub fn fixtures() -> impl Iterator<Item = Fixture> {
    fixture_names()
        .into_iter()
        .filter_map(|name| Fixture::load(&name).ok())
}
