use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::config::Config;
use crate::decode::decode_root;
use crate::shape::{Scan, Shape, Slot};
use crate::spec::TypeSpec;
use crate::value::{Map, Value};
use crate::{Result, ScanError};

/// Descriptor cache plus decode entry points.
///
/// Each distinct destination type is compiled at most once; the resulting
/// [`TypeSpec`] is shared read-only by every later decode and never evicted.
#[derive(Debug, Default)]
pub struct Registry {
	config: Config,
	specs: RwLock<HashMap<TypeId, Arc<TypeSpec>>>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Process-wide registry with default configuration.
pub fn global() -> &'static Registry {
	&GLOBAL
}

/// Decode `source` into `dest` using the [`global`] registry.
pub fn decode<D: Slot>(source: &Map, dest: &mut D) -> Result<()> {
	global().decode(source, dest)
}

impl Registry {
	/// Empty registry with default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty registry with the given configuration.
	pub fn with_config(config: Config) -> Self {
		Self {
			config,
			specs: RwLock::default(),
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Fetch the compiled spec for `shape`, compiling it on first use.
	pub fn spec_for(&self, shape: &'static Shape) -> Result<Arc<TypeSpec>> {
		let id = shape.id();
		if let Some(spec) = self.specs.read().get(&id) {
			return Ok(Arc::clone(spec));
		}

		let mut specs = self.specs.write();
		// Another caller may have finished compiling while we waited.
		if let Some(spec) = specs.get(&id) {
			return Ok(Arc::clone(spec));
		}

		let spec = Arc::new(TypeSpec::compile(shape, self.config.max_embed_depth)?);
		tracing::debug!(type_name = shape.type_name, fields = spec.len(), "compiled type spec");
		specs.insert(id, Arc::clone(&spec));
		Ok(spec)
	}

	/// Fetch the compiled spec for `T`.
	pub fn spec<T: Scan>(&self) -> Result<Arc<TypeSpec>> {
		self.spec_for(T::SHAPE)
	}

	/// Number of compiled specs held.
	pub fn cached(&self) -> usize {
		self.specs.read().len()
	}

	/// Decode `source` into `dest`, which must resolve to a record.
	///
	/// Keys without a matching field are skipped and fields without a key are left
	/// untouched. The first failure is returned; fields written before it stay written.
	pub fn decode<D: Slot>(&self, source: &Map, dest: &mut D) -> Result<()> {
		decode_root(self, source, dest)
	}

	/// Decode a JSON object document into `dest`.
	pub fn decode_json<D: Slot>(&self, text: &str, dest: &mut D) -> Result<()> {
		let json: serde_json::Value = serde_json::from_str(text)?;
		match Value::try_from(json)? {
			Value::Map(source) => self.decode(&source, dest),
			other => Err(ScanError::UnsupportedInput { kind: other.kind_name() }),
		}
	}
}
