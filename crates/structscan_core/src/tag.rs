/// Parsed field tag details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TagDecl<'a> {
	/// External name override, when the first segment is non-empty.
	pub name: Option<&'a str>,
	/// Field is excluded from scanning (`-`).
	pub skip: bool,
	/// `omitempty` option was present.
	pub omit_empty: bool,
}

/// Parse tag text of the form `"-" | name? ("," option)*`.
///
/// Returns the first unrecognized option as `Err`. Empty option segments are ignored.
pub(crate) fn parse_tag(raw: &str) -> Result<TagDecl<'_>, &str> {
	let mut decl = TagDecl::default();
	if raw.is_empty() {
		return Ok(decl);
	}

	let mut segments = raw.split(',');
	let first = segments.next().unwrap_or_default();
	if first == "-" {
		decl.skip = true;
		return Ok(decl);
	}
	if !first.is_empty() {
		decl.name = Some(first);
	}

	for option in segments {
		match option {
			"" => {}
			"omitempty" => decl.omit_empty = true,
			unknown => return Err(unknown),
		}
	}

	Ok(decl)
}
