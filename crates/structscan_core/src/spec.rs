use std::collections::HashMap;

use serde::Serialize;

use crate::shape::Shape;
use crate::tag::parse_tag;
use crate::{Result, ScanError};

/// Compiled descriptor for one resolvable external name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
	/// External name matched against source keys.
	pub name: &'static str,
	/// Member indices from the destination root, through embedded members, to the field.
	pub path: Vec<usize>,
	/// `omitempty` was declared. Carried for completeness; decoding ignores it.
	pub omit_empty: bool,
	/// Auxiliary option text for custom decoders.
	pub options: &'static str,
}

impl FieldSpec {
	/// Embedding depth the field was promoted from (`0` for direct members).
	pub fn depth(&self) -> usize {
		self.path.len().saturating_sub(1)
	}
}

/// Name-indexed field-resolution table for one destination type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeSpec {
	type_name: &'static str,
	#[serde(skip)]
	by_name: HashMap<&'static str, usize>,
	fields: Vec<FieldSpec>,
}

impl TypeSpec {
	/// Compile a shape, promoting embedded members up to `max_embed_depth` levels.
	pub fn compile(shape: &'static Shape, max_embed_depth: usize) -> Result<Self> {
		let mut compiler = Compiler {
			root: shape.type_name,
			max_embed_depth,
			depth_of: HashMap::new(),
			fields: Vec::new(),
		};
		compiler.walk(shape, &mut Vec::new())?;

		let fields = compiler.fields;
		let by_name = fields.iter().enumerate().map(|(idx, field)| (field.name, idx)).collect();
		Ok(Self {
			type_name: shape.type_name,
			by_name,
			fields,
		})
	}

	/// Declared name of the compiled type.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Resolve an external name.
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.by_name.get(name).map(|idx| &self.fields[*idx])
	}

	/// Resolvable fields in compilation order.
	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	/// Number of resolvable names.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no name resolves.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

struct Compiler {
	root: &'static str,
	max_embed_depth: usize,
	/// Shallowest depth each external name has been seen at.
	depth_of: HashMap<&'static str, usize>,
	fields: Vec<FieldSpec>,
}

impl Compiler {
	fn walk(&mut self, shape: &'static Shape, path: &mut Vec<usize>) -> Result<()> {
		if path.len() > self.max_embed_depth {
			return Err(ScanError::EmbedDepthExceeded {
				type_name: self.root,
				max_depth: self.max_embed_depth,
			});
		}

		for (idx, field) in shape.fields.iter().enumerate() {
			if let Some(embedded) = field.embedded {
				path.push(idx);
				let walked = self.walk(embedded(), path);
				path.pop();
				walked?;
				continue;
			}

			let tag = parse_tag(field.tag.unwrap_or_default()).map_err(|option| ScanError::UnknownTagOption {
				type_name: shape.type_name,
				field: field.name,
				option: option.to_owned(),
			})?;
			if tag.skip {
				continue;
			}

			let name = tag.name.unwrap_or(field.name);
			let depth = path.len();
			match self.depth_of.get(name).copied() {
				Some(seen) if seen < depth => {
					tracing::trace!(type_name = self.root, name, depth, seen, "name shadowed by shallower field");
				}
				Some(seen) if seen == depth => {
					tracing::trace!(type_name = self.root, name, depth, "ambiguous name removed");
					self.fields.retain(|spec| spec.name != name);
				}
				_ => {
					self.fields.retain(|spec| spec.name != name);
					self.depth_of.insert(name, depth);
					let mut full = path.clone();
					full.push(idx);
					self.fields.push(FieldSpec {
						name,
						path: full,
						omit_empty: tag.omit_empty,
						options: field.options,
					});
				}
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests;
