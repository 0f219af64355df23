//! `#[derive(Scan)]`: emit a static `structscan::Shape` table plus the member access
//! impls the decoder walks at runtime.
//!
//! Field attributes, all inside `#[scan(...)]` and comma separated:
//! - `"name,omitempty"` or `"-"`: the scan tag (external name, options, or exclusion);
//! - `embed`: promote the member's own fields into the enclosing namespace;
//! - `options = "..."`: opaque text handed to the field's custom decoder.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Token, parse_macro_input};

/// Derive `Scan`, `Record`, `Embed`, and `Slot` for a struct with named fields.
#[proc_macro_derive(Scan, attributes(scan))]
pub fn derive_scan(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand_scan(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

enum ScanArg {
	Tag(LitStr),
	Embed,
	Options(LitStr),
}

impl Parse for ScanArg {
	fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
		if input.peek(LitStr) {
			return Ok(Self::Tag(input.parse()?));
		}

		let ident: Ident = input.parse()?;
		if ident == "embed" {
			return Ok(Self::Embed);
		}
		if ident == "options" {
			input.parse::<Token![=]>()?;
			return Ok(Self::Options(input.parse()?));
		}
		Err(Error::new(ident.span(), "expected a tag string, `embed`, or `options = \"...\"`"))
	}
}

#[derive(Default)]
struct FieldAttrs {
	tag: Option<LitStr>,
	embed: bool,
	options: Option<LitStr>,
}

fn field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
	let mut attrs = FieldAttrs::default();
	for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("scan")) {
		let args = attr.parse_args_with(Punctuated::<ScanArg, Token![,]>::parse_terminated)?;
		for arg in args {
			match arg {
				ScanArg::Tag(lit) => {
					if attrs.tag.is_some() {
						return Err(Error::new(lit.span(), "duplicate scan tag"));
					}
					validate_tag(&lit)?;
					attrs.tag = Some(lit);
				}
				ScanArg::Embed => attrs.embed = true,
				ScanArg::Options(lit) => attrs.options = Some(lit),
			}
		}
	}

	if attrs.embed
		&& let Some(tag) = &attrs.tag
	{
		return Err(Error::new(tag.span(), "embedded members cannot carry a scan tag"));
	}
	Ok(attrs)
}

/// Reject tag options the runtime compiler would refuse.
fn validate_tag(lit: &LitStr) -> syn::Result<()> {
	let value = lit.value();
	let mut segments = value.split(',');
	if segments.next() == Some("-") {
		return Ok(());
	}
	for option in segments {
		match option {
			"" | "omitempty" => {}
			other => return Err(Error::new(lit.span(), format!("unknown scan tag option `{other}`"))),
		}
	}
	Ok(())
}

fn expand_scan(input: DeriveInput) -> syn::Result<TokenStream2> {
	if !input.generics.params.is_empty() {
		return Err(Error::new(input.generics.span(), "#[derive(Scan)] does not support generic types"));
	}

	let fields: Vec<&syn::Field> = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(named) => named.named.iter().collect(),
			Fields::Unit => Vec::new(),
			Fields::Unnamed(unnamed) => return Err(Error::new(unnamed.span(), "#[derive(Scan)] requires named fields")),
		},
		Data::Enum(data) => return Err(Error::new(data.enum_token.span(), "#[derive(Scan)] only supports structs")),
		Data::Union(data) => return Err(Error::new(data.union_token.span(), "#[derive(Scan)] only supports structs")),
	};

	let mut descriptors = Vec::with_capacity(fields.len());
	let mut arms = Vec::with_capacity(fields.len());
	for (idx, field) in fields.into_iter().enumerate() {
		let attrs = field_attrs(field)?;
		let member = field.ident.as_ref().ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
		let name = member.unraw().to_string();
		let ty = &field.ty;
		let tag = match &attrs.tag {
			Some(lit) => quote!(::core::option::Option::Some(#lit)),
			None => quote!(::core::option::Option::None),
		};
		let options = attrs.options.as_ref().map(LitStr::value).unwrap_or_default();

		if attrs.embed {
			descriptors.push(quote! {
				::structscan::Field {
					name: #name,
					tag: #tag,
					options: #options,
					embedded: ::core::option::Option::Some(<#ty as ::structscan::Embed>::embedded_shape),
				}
			});
			arms.push(quote! {
				#idx => ::core::option::Option::Some(::structscan::Member::Embedded(::structscan::Embed::record_mut(&mut self.#member)))
			});
		} else {
			descriptors.push(quote! {
				::structscan::Field {
					name: #name,
					tag: #tag,
					options: #options,
					embedded: ::core::option::Option::None,
				}
			});
			arms.push(quote! {
				#idx => ::core::option::Option::Some(::structscan::Member::Slot(&mut self.#member))
			});
		}
	}

	let ident = &input.ident;
	let type_name = ident.unraw().to_string();

	Ok(quote! {
		impl ::structscan::Scan for #ident {
			const SHAPE: &'static ::structscan::Shape = &::structscan::Shape {
				type_name: #type_name,
				type_id: ::core::any::TypeId::of::<#ident>,
				fields: &[#(#descriptors),*],
			};
		}

		impl ::structscan::Record for #ident {
			fn shape(&self) -> &'static ::structscan::Shape {
				<Self as ::structscan::Scan>::SHAPE
			}

			fn member_mut(&mut self, index: usize) -> ::core::option::Option<::structscan::Member<'_>> {
				match index {
					#(#arms,)*
					_ => ::core::option::Option::None,
				}
			}
		}

		impl ::structscan::Embed for #ident {
			fn embedded_shape() -> &'static ::structscan::Shape {
				<Self as ::structscan::Scan>::SHAPE
			}

			fn record_mut(&mut self) -> &mut dyn ::structscan::Record {
				self
			}
		}

		impl ::structscan::Slot for #ident {
			fn dest(&mut self) -> ::structscan::Dest<'_> {
				::structscan::Dest::Record(self)
			}
		}
	})
}
