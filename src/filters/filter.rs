//! This module provides the `Filter` trait and the metadata structure shared by all image filters
//! of the deblurring pipeline.

use crate::error::DeblurError;
use ndarray::Array2;
use std::fmt::Debug;

/// The `Filter` trait defines the structure and behavior of an image filter.
///
/// Filters must implement:
/// - A `config` function to provide metadata for the filter.
/// - A `filter` function that maps a grayscale image to a new image of the same dimensions.
///
/// Filters are plain parameter holders, applying one never changes its state.
///
/// **Example**:
/// ```rust,ignore
/// use crate::filters::filter::{Filter, FilterConfig};
///
/// #[derive(Clone, Debug)]
/// struct Identity;
///
/// impl Filter for Identity {
///     fn config(&self) -> FilterConfig {
///         FilterConfig {
///             name: "Identity".to_string(),
///             description: "Returns the input unchanged.".to_string(),
///             hyperlink: None,
///         }
///     }
///
///     fn filter(&self, input: &Array2<f32>) -> Result<Array2<f32>, DeblurError> {
///         Ok(input.clone())
///     }
/// }
/// ```
pub trait Filter: Send + Sync + Debug {
    /// Returns the filter configuration, including name and description.
    fn config(&self) -> FilterConfig;

    /// Applies the filter to the given image.
    ///
    /// # Arguments
    /// - `input`: The grayscale image, with even dimensions.
    ///
    /// # Returns
    /// The filtered image with the same dimensions as `input`. Values are not clamped.
    fn filter(&self, input: &Array2<f32>) -> Result<Array2<f32>, DeblurError>;
}

/// A structure representing the configuration and metadata of a filter.
///
/// # Fields
/// - `name`: A human-readable name for the filter.
/// - `description`: A detailed description of what the filter does.
/// - `hyperlink`: Optional DOI or reference link with label.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// The name of the filter, used for identification and logging.
    pub name: String,
    /// A description of the filter, explaining its purpose and functionality.
    pub description: String,
    /// An optional hyperlink to a DOI or reference, with an optional label.
    pub hyperlink: Option<(Option<String>, String)>, // (optional_label, url)
}
