//! Runtime plugin registry for instantiating importers and converters by name.

use crate::converter::ImageConverter;
use crate::importer::ImageImporter;
use crate::{CodecImageImporter, PngImageConverter};

/// Factory producing a fresh importer instance.
pub type ImporterFactory = fn() -> Box<dyn ImageImporter>;

/// Factory producing a fresh converter instance.
pub type ConverterFactory = fn() -> Box<dyn ImageConverter>;

#[derive(Clone, Debug)]
struct Entry<F> {
    name: &'static str,
    aliases: &'static [&'static str],
    factory: F,
    enabled: bool,
}

impl<F> Entry<F> {
    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| *alias == name)
    }
}

const IMPORTER_ALIASES: &[&str] = &[
    "PngImporter",
    "JpegImporter",
    "TgaImporter",
    "BmpImporter",
    "IcoImporter",
];

fn codec_importer() -> Box<dyn ImageImporter> {
    Box::new(CodecImageImporter::new())
}

fn png_converter() -> Box<dyn ImageConverter> {
    Box::new(PngImageConverter::new())
}

/// Runtime plugin registry.
///
/// Every plugin compiled into the crate is registered; the registry controls
/// which of them are *enabled*. Disabled plugins can't be instantiated but
/// keep their entry, so they can be switched back on later.
///
/// Importers answer to their own name and to per-format aliases, so a host
/// asking for `"TgaImporter"` gets a [`CodecImageImporter`].
#[derive(Clone, Debug)]
pub struct PluginRegistry {
    importers: Vec<Entry<ImporterFactory>>,
    converters: Vec<Entry<ConverterFactory>>,
}

impl PluginRegistry {
    /// All built-in plugins enabled.
    pub fn all() -> Self {
        Self {
            importers: vec![Entry {
                name: CodecImageImporter::NAME,
                aliases: IMPORTER_ALIASES,
                factory: codec_importer as ImporterFactory,
                enabled: true,
            }],
            converters: vec![Entry {
                name: PngImageConverter::NAME,
                aliases: &[],
                factory: png_converter as ConverterFactory,
                enabled: true,
            }],
        }
    }

    /// Everything registered, nothing enabled. Caller must opt in.
    pub fn none() -> Self {
        let mut registry = Self::all();
        registry.importers.iter_mut().for_each(|e| e.enabled = false);
        registry.converters.iter_mut().for_each(|e| e.enabled = false);
        registry
    }

    /// Enable or disable the plugin known by `name` (or one of its aliases).
    ///
    /// Unknown names are ignored.
    pub fn with_plugin(mut self, name: &str, enabled: bool) -> Self {
        self.set_enabled(name, enabled);
        self
    }

    /// Enable or disable in place. Returns `false` if no plugin answers to `name`.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut found = false;
        for entry in self.importers.iter_mut().filter(|e| e.answers_to(name)) {
            entry.enabled = enabled;
            found = true;
        }
        for entry in self.converters.iter_mut().filter(|e| e.answers_to(name)) {
            entry.enabled = enabled;
            found = true;
        }
        if !found {
            tracing::warn!(name, "no such plugin");
        }
        found
    }

    /// Register an additional importer.
    pub fn register_importer(
        &mut self,
        name: &'static str,
        aliases: &'static [&'static str],
        factory: ImporterFactory,
    ) {
        self.importers.push(Entry {
            name,
            aliases,
            factory,
            enabled: true,
        });
    }

    /// Register an additional converter.
    pub fn register_converter(
        &mut self,
        name: &'static str,
        aliases: &'static [&'static str],
        factory: ConverterFactory,
    ) {
        self.converters.push(Entry {
            name,
            aliases,
            factory,
            enabled: true,
        });
    }

    /// Is an importer known by `name` registered AND enabled?
    pub fn has_importer(&self, name: &str) -> bool {
        self.importers.iter().any(|e| e.enabled && e.answers_to(name))
    }

    /// Is a converter known by `name` registered AND enabled?
    pub fn has_converter(&self, name: &str) -> bool {
        self.converters.iter().any(|e| e.enabled && e.answers_to(name))
    }

    /// New importer instance, or `None` if nothing enabled answers to `name`.
    pub fn instantiate_importer(&self, name: &str) -> Option<Box<dyn ImageImporter>> {
        let entry = self.importers.iter().find(|e| e.enabled && e.answers_to(name))?;
        tracing::debug!(requested = name, plugin = entry.name, "instantiating importer");
        Some((entry.factory)())
    }

    /// New converter instance, or `None` if nothing enabled answers to `name`.
    pub fn instantiate_converter(&self, name: &str) -> Option<Box<dyn ImageConverter>> {
        let entry = self.converters.iter().find(|e| e.enabled && e.answers_to(name))?;
        tracing::debug!(requested = name, plugin = entry.name, "instantiating converter");
        Some((entry.factory)())
    }

    /// Primary names of the enabled importers.
    pub fn importer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.importers.iter().filter(|e| e.enabled).map(|e| e.name)
    }

    /// Primary names of the enabled converters.
    pub fn converter_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.converters.iter().filter(|e| e.enabled).map(|e| e.name)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::all()
    }
}
