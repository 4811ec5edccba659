use faraday_catalog::{Catalog, CatalogFamily};

use crate::error::{Error, Result};
use crate::pass::PassSummary;
use crate::progress::{CancelToken, ProgressFn};

/// Which catalog family a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySelector {
    /// The rotation-measure source catalog (`RM`).
    Sources,
    /// The galaxy reference catalog (`GAL`).
    Galaxies,
}

impl FamilySelector {
    pub fn parse(token: &str) -> Result<Self> {
        match token.to_uppercase().as_str() {
            "RM" => Ok(FamilySelector::Sources),
            "GAL" => Ok(FamilySelector::Galaxies),
            _ => Err(Error::Parse(format!(
                "unknown catalog selector: {} (expected RM or GAL)",
                token
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FamilySelector::Sources => "RM",
            FamilySelector::Galaxies => "GAL",
        }
    }
}

/// All state a command can touch: both catalog families, the shared
/// cancellation token, an optional progress observer and the summary of
/// the last pass. No globals; independent sessions are fully isolated.
pub struct Session {
    pub galaxies: CatalogFamily,
    pub sources: CatalogFamily,
    pub cancel: CancelToken,
    pub observer: Option<Box<ProgressFn>>,
    pub last_pass: Option<(&'static str, PassSummary)>,
}

impl Session {
    pub fn new(galaxies: Catalog, sources: Catalog) -> Self {
        Self {
            galaxies: CatalogFamily::new(galaxies),
            sources: CatalogFamily::new(sources),
            cancel: CancelToken::new(),
            observer: None,
            last_pass: None,
        }
    }

    pub fn family(&self, selector: FamilySelector) -> &CatalogFamily {
        match selector {
            FamilySelector::Sources => &self.sources,
            FamilySelector::Galaxies => &self.galaxies,
        }
    }

    pub fn family_mut(&mut self, selector: FamilySelector) -> &mut CatalogFamily {
        match selector {
            FamilySelector::Sources => &mut self.sources,
            FamilySelector::Galaxies => &mut self.galaxies,
        }
    }

    pub fn observer(&self) -> Option<&ProgressFn> {
        self.observer.as_deref()
    }

    /// Rearms the cancellation token; pass-launching commands call this
    /// before starting so a stale CANCEL cannot stop a fresh pass.
    pub fn begin_pass(&self) {
        self.cancel.reset();
    }

    pub fn record_pass(&mut self, name: &'static str, summary: PassSummary) {
        self.last_pass = Some((name, summary));
    }
}
