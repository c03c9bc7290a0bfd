//! Template enumeration and storage.

use tracing::debug;

use super::constants::{MAX_WAVELENGTH_LEVEL, MIN_WAVELENGTH_LEVEL, MIN_WIDTH_LEVEL};
use crate::{BitPattern, Hypothesis, LIBRARY_SIZE};

/// A library entry: a quantized pattern and the hypothesis that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Template {
    /// Quantized bit pattern.
    pub bits: BitPattern,
    /// Originating continuous parameterization.
    pub hypothesis: Hypothesis,
    /// Position in enumeration order.
    pub index: usize,
}

/// The exhaustive, immutable model library.
///
/// Built once, read-only afterwards. Enumeration runs wavelength level
/// outermost, then phase level, then width level, each ascending; phase
/// levels zero and `ilambda` both appear even though they quantize to the
/// same pattern, so duplicate patterns resolve to the lower index.
pub struct ModelLibrary {
    templates: Vec<Template>,
}

impl ModelLibrary {
    /// Enumerate and quantize every valid level triple.
    pub fn build() -> Self {
        let mut templates = Vec::with_capacity(LIBRARY_SIZE);

        for ilambda in MIN_WAVELENGTH_LEVEL..=MAX_WAVELENGTH_LEVEL {
            for iphase in 0..=ilambda {
                for iwidth in MIN_WIDTH_LEVEL..ilambda - 1 {
                    let hypothesis = Hypothesis::from_levels(ilambda, iphase, iwidth);
                    templates.push(Template {
                        bits: hypothesis.sample(),
                        hypothesis,
                        index: templates.len(),
                    });
                }
            }
        }

        assert_eq!(templates.len(), LIBRARY_SIZE);
        debug!(size = templates.len(), "model library built");

        Self { templates }
    }

    #[cfg(test)]
    pub(crate) fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// All templates in enumeration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Template at `index`.
    pub fn template(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if no template was enumerated.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }
}

impl Default for ModelLibrary {
    fn default() -> Self {
        Self::build()
    }
}
