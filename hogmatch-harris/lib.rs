//! Harris corner detection over a strided grid of square windows.
//!
//! Gradients come from a 5×5 Sobel filter, are smoothed with a small
//! Gaussian, and their second moments are summed per window into a 2×2
//! structure tensor. Window centers whose response
//! `det(M) - alpha * trace(M)^2` exceeds the threshold become interest
//! points. Adjacent windows may all pass around one corner; no
//! non-maximum suppression is applied.

pub mod detector;
pub mod integral;
pub mod moments;
pub mod types;

pub use detector::HarrisDetector;
pub use integral::IntegralImage;
pub use moments::{DirectSums, IntegralSums, MomentMaps, WindowSums};
pub use types::{ScoredPoint, StructureTensor};
