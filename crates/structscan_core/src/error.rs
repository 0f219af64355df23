use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Opaque error returned by custom decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while compiling type specs and decoding sources.
#[derive(Debug, Error)]
pub enum ScanError {
	/// Destination does not resolve to a struct-like record.
	#[error("destination must be a struct-like record, got {type_name}")]
	InvalidDestination {
		/// Rust type name of the rejected destination.
		type_name: &'static str,
	},
	/// A compiled field path no longer matches the record's members.
	#[error("shape mismatch in {type_name}: no slot at member path {path:?}")]
	ShapeMismatch {
		/// Record type whose members were walked.
		type_name: &'static str,
		/// Member index path that failed to resolve.
		path: Vec<usize>,
	},
	/// Field tag carried an option outside the recognized set.
	#[error("unknown field tag option {option:?} on {type_name}.{field}")]
	UnknownTagOption {
		/// Type declaring the field.
		type_name: &'static str,
		/// Declared field name.
		field: &'static str,
		/// Offending option text.
		option: String,
	},
	/// Embedded members nest deeper than the configured limit.
	#[error("embedding depth exceeded in {type_name} (max={max_depth})")]
	EmbedDepthExceeded {
		/// Root type being compiled.
		type_name: &'static str,
		/// Configured depth ceiling.
		max_depth: usize,
	},
	/// Coercing a source value into a field failed.
	#[error("cannot assign field {field}: {source}")]
	Field {
		/// Dotted path of resolved field names.
		field: String,
		/// Underlying coercion failure.
		#[source]
		source: CoerceError,
	},
	/// Source data uses a shape the value model cannot represent.
	#[error("unsupported input: {kind}")]
	UnsupportedInput {
		/// Kind of the rejected input.
		kind: &'static str,
	},
	/// JSON text failed to parse.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}

/// Errors produced by the value-coercion engine for a single field.
#[derive(Debug, Error)]
pub enum CoerceError {
	/// Source variant cannot be stored in the destination kind.
	#[error("cannot convert from {from} to {to}")]
	Unconvertible {
		/// Source value kind.
		from: &'static str,
		/// Destination type name.
		to: &'static str,
	},
	/// Text failed numeric or boolean parsing.
	#[error("cannot parse {text:?} as {to}")]
	Malformed {
		/// Rejected text.
		text: String,
		/// Destination type name.
		to: &'static str,
	},
	/// Numeric narrowing would lose information.
	#[error("value {value} out of range for {to}")]
	OutOfRange {
		/// Rejected value, rendered as text.
		value: String,
		/// Destination type name.
		to: &'static str,
	},
	/// A custom decoder reported failure.
	#[error("{0}")]
	Custom(#[source] BoxError),
}

/// Coarse error taxonomy shared by [`ScanError`] and [`CoerceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Destination is not a struct-like record.
	InvalidDestination,
	/// Destination type declaration is malformed.
	SpecCompilation,
	/// Source variant incompatible with the destination kind.
	UnconvertibleType,
	/// Text failed numeric or boolean parsing.
	MalformedScalar,
	/// Numeric narrowing would lose information.
	OutOfRange,
	/// Custom decoder failure.
	CustomScan,
	/// Source data outside the value model.
	UnsupportedInput,
}

impl ScanError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidDestination { .. } | Self::ShapeMismatch { .. } => ErrorKind::InvalidDestination,
			Self::UnknownTagOption { .. } | Self::EmbedDepthExceeded { .. } => ErrorKind::SpecCompilation,
			Self::Field { source, .. } => source.kind(),
			Self::UnsupportedInput { .. } | Self::Json(_) => ErrorKind::UnsupportedInput,
		}
	}

	/// Dotted path of the field that failed, when the error is field-scoped.
	pub fn field(&self) -> Option<&str> {
		match self {
			Self::Field { field, .. } => Some(field),
			_ => None,
		}
	}

	pub(crate) fn field_error(field: &str, source: CoerceError) -> Self {
		Self::Field {
			field: field.to_owned(),
			source,
		}
	}

	/// Prefix a nested field error with the enclosing field name.
	pub(crate) fn nested_in(self, parent: &str) -> Self {
		match self {
			Self::Field { field, source } => Self::Field {
				field: format!("{parent}.{field}"),
				source,
			},
			other => other,
		}
	}
}

impl CoerceError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Unconvertible { .. } => ErrorKind::UnconvertibleType,
			Self::Malformed { .. } => ErrorKind::MalformedScalar,
			Self::OutOfRange { .. } => ErrorKind::OutOfRange,
			Self::Custom(_) => ErrorKind::CustomScan,
		}
	}
}
