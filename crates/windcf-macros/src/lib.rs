use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a column-oriented companion struct for
/// collecting one record per hour. All fields in the source struct must be `f64`.
///
/// The generated struct has the same fields as `Vec<f64>` columns, along with
/// `with_capacity`, `push`, `len`, `is_empty` and `columns` methods.
/// A `field_names()` associated function is also added to the original struct.
///
/// Use `#[timeseries(name = "CustomName")]` to override the default
/// companion name (`{StructName}Timeseries`).
#[proc_macro_derive(Timeseries, attributes(timeseries))]
pub fn derive_timeseries(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let ts_name = extract_companion_name(&input)
        .unwrap_or_else(|| format_ident!("{}Timeseries", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Timeseries can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Timeseries can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Timeseries struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut field_names = Vec::new();
    let mut field_idents = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if !is_f64_type(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "Timeseries derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        field_names.push(ident.to_string());
        field_idents.push(ident);
    }

    let first_field = &field_idents[0];
    let field_name_strs: Vec<&str> = field_names.iter().map(|s| s.as_str()).collect();

    let column_fields = field_idents.iter().map(|f| quote! { pub #f: Vec<f64> });
    let with_cap_fields = field_idents.iter().map(|f| quote! { #f: Vec::with_capacity(n) });
    let push_fields = field_idents.iter().map(|f| quote! { self.#f.push(row.#f); });
    let column_refs = field_idents
        .iter()
        .zip(field_name_strs.iter())
        .map(|(f, s)| quote! { (#s, self.#f.as_slice()) });

    let expanded = quote! {
        /// Column-oriented series with one entry per pushed record.
        #[derive(Debug, Clone, PartialEq)]
        pub struct #ts_name {
            #(#column_fields,)*
        }

        impl #ts_name {
            /// Pre-allocate every column for `n` records.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append one record.
            pub fn push(&mut self, row: &#name) {
                #(#push_fields)*
            }

            /// Number of records stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no records have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }

            /// Borrow every column alongside its field name, in declaration order.
            pub fn columns(&self) -> Vec<(&'static str, &[f64])> {
                vec![#(#column_refs),*]
            }
        }

        impl #name {
            /// Returns the field names of this record, in declaration order.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_name_strs),*]
            }
        }
    };

    expanded.into()
}

fn extract_companion_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if !attr.path().is_ident("timeseries") {
            continue;
        }
        let nested = attr
            .parse_args_with(
                syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()?;
        for meta in nested {
            if let Meta::NameValue(nv) = meta {
                if !nv.path.is_ident("name") {
                    continue;
                }
                if let syn::Expr::Lit(expr_lit) = &nv.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(format_ident!("{}", lit_str.value()));
                    }
                }
            }
        }
    }
    None
}

fn is_f64_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(type_path) => type_path.path.is_ident("f64"),
        _ => false,
    }
}
