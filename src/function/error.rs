/// Construction-time failure of a legacy stop function.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    /// `type` is not one of exponential, interval, categorical or identity.
    #[error("Unknown function type \"{0}\"")]
    UnknownType(String),

    /// `colorSpace` is not one of rgb, hcl or lab.
    #[error("Unknown color space: \"{0}\"")]
    UnknownColorSpace(String),

    /// A stop-based function without stops.
    #[error("function has no stops")]
    EmptyStops,

    /// Interval and exponential stops need numeric inputs.
    #[error("stop {index} has a non-numeric input")]
    NonNumericStop {
        /// Stop position.
        index: usize,
    },

    /// Interval and exponential stops need ascending inputs.
    #[error("stop {index} is out of order; stop inputs must be ascending")]
    UnsortedStops {
        /// Position of the first stop smaller than its predecessor.
        index: usize,
    },

    /// A stop output does not parse as the property's value type.
    #[error("stop {index} output {value} is not a valid {ty}")]
    InvalidStopOutput {
        /// Stop position.
        index: usize,
        /// Raw output.
        value: String,
        /// Property value type.
        ty: String,
    },

    /// A default does not parse as the property's value type.
    #[error("default {value} is not a valid {ty}")]
    InvalidDefault {
        /// Raw default.
        value: String,
        /// Property value type.
        ty: String,
    },

    /// A zoom-and-property stop key without a numeric `zoom` and a `value`.
    #[error("stop {index} must have a numeric \"zoom\" and a \"value\"")]
    MalformedCompositeKey {
        /// Stop position.
        index: usize,
    },
}
