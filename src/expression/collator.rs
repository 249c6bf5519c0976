//! Locale- and sensitivity-aware string comparison.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use icu_collator::provider::{Baked, CollationDataV1Marker};
use icu_collator::{CaseLevel, Collator as IcuCollator, CollatorOptions, Strength};
use icu_locid::Locale;
use icu_locid::extensions::unicode::{key, value};
use icu_locid_transform::LocaleFallbacker;
use icu_provider::{DataLocale, DataProvider, DataRequest, KeyedDataMarker};

/// Granularity of string equivalence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensitivity {
    /// Only base letters differ: `a = á = A`.
    Base,
    /// Base letters and accents differ: `a ≠ á`, `a = A`.
    Accent,
    /// Base letters and case differ: `a ≠ A`, `a = á`.
    Case,
    /// Everything differs.
    Variant,
}

impl Sensitivity {
    /// Derive from the two style-spec flags.
    pub fn from_flags(case_sensitive: bool, diacritic_sensitive: bool) -> Self {
        match (case_sensitive, diacritic_sensitive) {
            (true, true) => Self::Variant,
            (true, false) => Self::Case,
            (false, true) => Self::Accent,
            (false, false) => Self::Base,
        }
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Accent => "accent",
            Self::Case => "case",
            Self::Variant => "variant",
        }
    }
}

/// The comparison engine a [`Collator`] delegates to.
pub trait LocaleEngine: Send + Sync + fmt::Debug {
    /// Three-way comparison using search-usage rules.
    fn compare(&self, lhs: &str, rhs: &str) -> Ordering;

    /// Locale tag the engine selected for sort usage, after any fallback.
    fn resolved_locale(&self) -> String;
}

/// Immutable string comparator configured by locale and sensitivity.
#[derive(Clone, Debug)]
pub struct Collator {
    locale: Option<String>,
    sensitivity: Sensitivity,
    engine: Arc<dyn LocaleEngine>,
}

impl Collator {
    /// Build a collator backed by ICU collation data.
    pub fn new(case_sensitive: bool, diacritic_sensitive: bool, locale: Option<&str>) -> Self {
        let sensitivity = Sensitivity::from_flags(case_sensitive, diacritic_sensitive);
        let engine = IcuEngine::new(locale, sensitivity);
        Self {
            locale: locale.map(str::to_owned),
            sensitivity,
            engine: Arc::new(engine),
        }
    }

    /// Build a collator over a caller-supplied engine.
    pub fn with_engine(
        case_sensitive: bool,
        diacritic_sensitive: bool,
        locale: Option<&str>,
        engine: Arc<dyn LocaleEngine>,
    ) -> Self {
        Self {
            locale: locale.map(str::to_owned),
            sensitivity: Sensitivity::from_flags(case_sensitive, diacritic_sensitive),
            engine,
        }
    }

    /// Requested locale tag, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Derived sensitivity.
    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    /// Three-way comparison of `lhs` and `rhs`.
    pub fn compare(&self, lhs: &str, rhs: &str) -> Ordering {
        self.engine.compare(lhs, rhs)
    }

    /// Locale the engine actually selected.
    pub fn resolved_locale(&self) -> String {
        self.engine.resolved_locale()
    }
}

impl PartialEq for Collator {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale && self.sensitivity == other.sensitivity
    }
}

/// ICU4X-backed engine.
///
/// Unparseable or unsupported locales fall back along the collation fallback chain
/// (ultimately to the root collation) without error.
pub struct IcuEngine {
    collator: Option<IcuCollator>,
    resolved: String,
}

impl IcuEngine {
    /// Build a search-usage collator for `locale` at `sensitivity`.
    pub fn new(locale: Option<&str>, sensitivity: Sensitivity) -> Self {
        let parsed = locale.and_then(|tag| tag.parse::<Locale>().ok());
        let resolved = resolve_sort_locale(parsed.as_ref(), sensitivity);

        let mut search = parsed.unwrap_or_default();
        search
            .extensions
            .unicode
            .keywords
            .set(key!("co"), value!("search"));

        let collator = IcuCollator::try_new(&(&search).into(), options_for(sensitivity))
            .or_else(|_| IcuCollator::try_new(&Default::default(), options_for(sensitivity)));
        let collator = match collator {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(error = %e, "collation data unavailable, comparing code points");
                None
            }
        };

        Self { collator, resolved }
    }
}

/// Locale whose collation data a sort-usage collator for `requested` ends up using.
///
/// Unicode extension keywords are dropped first, then the collation fallback chain is
/// walked until a locale with its own tailoring is found. Locales that use the root
/// collation resolve to `und`.
fn resolve_sort_locale(requested: Option<&Locale>, sensitivity: Sensitivity) -> String {
    let mut base = requested.cloned().unwrap_or_default();
    base.extensions.unicode.clear();

    let fallbacker =
        LocaleFallbacker::new().for_config(CollationDataV1Marker::KEY.fallback_config());
    let mut chain = fallbacker.fallback_for(DataLocale::from(&base));
    let selected = loop {
        let candidate = chain.get();
        if candidate.is_und() || has_own_collation_data(candidate) {
            break candidate.clone();
        }
        chain.step();
    };

    if let Err(e) = IcuCollator::try_new(&selected, options_for(sensitivity)) {
        tracing::debug!(locale = %selected, error = %e, "sort collator unavailable");
        return "und".to_owned();
    }
    selected.into_locale().to_string()
}

/// Whether the compiled data carries collation data at exactly `locale`.
fn has_own_collation_data(locale: &DataLocale) -> bool {
    let request = DataRequest {
        locale,
        metadata: Default::default(),
    };
    DataProvider::<CollationDataV1Marker>::load(&Baked, request)
        .is_ok_and(|response| response.metadata.locale.is_none())
}

fn options_for(sensitivity: Sensitivity) -> CollatorOptions {
    let mut options = CollatorOptions::new();
    options.strength = Some(match sensitivity {
        Sensitivity::Base | Sensitivity::Case => Strength::Primary,
        Sensitivity::Accent => Strength::Secondary,
        Sensitivity::Variant => Strength::Tertiary,
    });
    if sensitivity == Sensitivity::Case {
        options.case_level = Some(CaseLevel::On);
    }
    options
}

impl LocaleEngine for IcuEngine {
    fn compare(&self, lhs: &str, rhs: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(lhs, rhs),
            None => lhs.cmp(rhs),
        }
    }

    fn resolved_locale(&self) -> String {
        self.resolved.clone()
    }
}

impl fmt::Debug for IcuEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuEngine")
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/collator.rs"]
mod tests;
