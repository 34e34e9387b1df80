use ring_core::InspectionConfig;

use crate::classifier::RingClassifier;
use crate::config::ClassifierConfig;
use crate::contours::ChainApproximation;
use crate::error::DefectResult;

/// Builder for creating a `RingClassifier`
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    config: InspectionConfig,
    approximation: ChainApproximation,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: InspectionConfig::default(),
            approximation: ChainApproximation::default(),
        }
    }

    /// Set the flash tolerance as a fraction of the outer mean radius
    pub fn flash_threshold(mut self, threshold: f64) -> Self {
        self.config.flash_threshold = threshold;
        self
    }

    /// Set the cut tolerance as a fraction of the outer mean radius
    pub fn cut_threshold(mut self, threshold: f64) -> Self {
        self.config.cut_threshold = threshold;
        self
    }

    /// Set how boundary chains are reduced before measuring
    pub fn approximation(mut self, approximation: ChainApproximation) -> Self {
        self.approximation = approximation;
        self
    }

    /// Build the `RingClassifier`
    pub fn build(self) -> DefectResult<RingClassifier> {
        RingClassifier::with_approximation(self.config, self.approximation)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.clone().to_config().summary()
    }

    /// Create a builder from an existing `ClassifierConfig`
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self {
            config: config.core,
            approximation: config.approximation,
        }
    }

    /// Convert the builder into a `ClassifierConfig`
    pub fn to_config(self) -> ClassifierConfig {
        ClassifierConfig {
            core: self.config,
            approximation: self.approximation,
            name: None,
            description: None,
            version: None,
        }
    }
}
