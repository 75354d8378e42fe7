// SPDX-License-Identifier: MPL-2.0
use crate::error::{Error, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::fmt;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/messages/"]
struct Asset;

/// Locale of the embedded message resource.
pub const CATALOG_LOCALE: &str = "pt-BR";

/// Fluent-backed lookup of message texts.
pub struct Catalog {
    bundle: FluentBundle<FluentResource>,
    locale: LanguageIdentifier,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("locale", &self.locale.to_string())
            .finish()
    }
}

impl Catalog {
    /// Loads the embedded resource for [`CATALOG_LOCALE`].
    pub fn load() -> Result<Self> {
        let filename = format!("{CATALOG_LOCALE}.ftl");
        let content = Asset::get(&filename)
            .ok_or_else(|| Error::Catalog(format!("missing embedded resource {filename}")))?;
        Self::from_source(
            CATALOG_LOCALE,
            String::from_utf8_lossy(content.data.as_ref()).to_string(),
        )
    }

    /// Builds a catalog from raw FTL source.
    pub fn from_source(locale: &str, source: String) -> Result<Self> {
        let locale: LanguageIdentifier = locale
            .parse()
            .map_err(|err| Error::Catalog(format!("invalid locale {locale}: {err}")))?;

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            Error::Catalog(format!("{} syntax error(s) in message resource", errors.len()))
        })?;

        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Bodies are markup, Unicode isolation marks would end up inside tags.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| Error::Catalog(format!("{errors:?}")))?;

        Ok(Self { bundle, locale })
    }

    #[must_use]
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Returns whether `key` names a message with a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.bundle
            .get_message(key)
            .is_some_and(|msg| msg.value().is_some())
    }

    /// Resolves a message without arguments.
    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Resolves a message, interpolating `args` as string variables.
    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.to_string());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(pattern) = self.bundle.get_message(key).and_then(|msg| msg.value()) {
            let mut errors = vec![];
            let value = self.bundle.format_pattern(pattern, args, &mut errors);
            if errors.is_empty() {
                return value.to_string();
            }
            tracing::warn!(key, ?errors, "message formatting failed");
        }
        format!("MISSING: {key}")
    }
}
