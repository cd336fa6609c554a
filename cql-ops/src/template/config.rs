use cql_ops_core::convert::ValueConverter;

/// `TemplateConfigBuilder` is used to create new `TemplateConfig`s
/// # Example
///
/// ```
/// # use cql_ops::template::TemplateConfig;
/// let config: TemplateConfig = TemplateConfig::builder()
///     .default_page_size(500)
///     .tracing(true)
///     .build();
/// assert_eq!(config.default_page_size(), Some(500));
/// ```
#[derive(Debug, Default)]
pub struct TemplateConfigBuilder {
    default_page_size: Option<i32>,
    tracing: Option<bool>,
    value_converter: Option<ValueConverter>,
}

impl TemplateConfigBuilder {
    /// Page size used by statements that don't set their own.
    /// By default the session decides.
    pub fn default_page_size(mut self, page_size: i32) -> Self {
        assert!(page_size > 0, "page size must be larger than 0");
        self.default_page_size = Some(page_size);
        self
    }

    /// Whether statements that don't say otherwise are executed with CQL tracing.
    /// The default is `false`.
    pub fn tracing(mut self, tracing: bool) -> Self {
        self.tracing = Some(tracing);
        self
    }

    /// Converter used for enum and scalar coercion of entity properties.
    /// The default one knows no enums.
    pub fn value_converter(mut self, converter: ValueConverter) -> Self {
        self.value_converter = Some(converter);
        self
    }

    pub fn build(self) -> TemplateConfig {
        TemplateConfig {
            default_page_size: self.default_page_size,
            tracing: self.tracing.unwrap_or(false),
            value_converter: self.value_converter.unwrap_or_default(),
        }
    }
}

/// Immutable configuration of a [`Template`](super::Template).
#[derive(Debug, Clone, Default)]
pub struct TemplateConfig {
    default_page_size: Option<i32>,
    tracing: bool,
    value_converter: ValueConverter,
}

impl TemplateConfig {
    /// Creates a blank builder that can be used to construct new TemplateConfig.
    pub fn builder() -> TemplateConfigBuilder {
        TemplateConfigBuilder::default()
    }

    /// Creates a builder having all options set to the same as set in this TemplateConfig.
    pub fn to_builder(&self) -> TemplateConfigBuilder {
        TemplateConfigBuilder {
            default_page_size: self.default_page_size,
            tracing: Some(self.tracing),
            value_converter: Some(self.value_converter.clone()),
        }
    }

    pub fn default_page_size(&self) -> Option<i32> {
        self.default_page_size
    }

    pub fn tracing(&self) -> bool {
        self.tracing
    }

    pub fn value_converter(&self) -> &ValueConverter {
        &self.value_converter
    }
}
