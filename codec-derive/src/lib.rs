use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam};

fn impl_derive_abi_tuple(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let data_struct = match &ast.data {
        Data::Struct(data_struct) => data_struct,
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "AbiTuple can only be derived for structs",
            ))
        }
    };
    let named_fields = match &data_struct.fields {
        Fields::Named(named_fields) => named_fields,
        fields => {
            return Err(syn::Error::new_spanned(
                fields,
                "AbiTuple requires named fields",
            ))
        }
    };

    let components = named_fields.named.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        // solidity components are camelCase
        let name = ident.to_string().to_case(Case::Camel);
        Some(quote! {
            (#name, ::abi_codec::ToAbiValue::to_abi_value(&self.#ident))
        })
    });

    let struct_name = &ast.ident;
    let mut generics = ast.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::abi_codec::ToAbiValue));
        }
    }
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::abi_codec::ToAbiValue for #struct_name #type_generics #where_clause {
            fn to_abi_value(&self) -> ::abi_codec::AbiValue {
                ::abi_codec::AbiValue::named::<_, &str>([#( #components ),*])
            }
        }
    })
}

/// Implements `ToAbiValue` for a struct with named fields, producing a named tuple keyed
/// by the camelCase field names.
#[proc_macro_derive(AbiTuple)]
pub fn abi_tuple_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impl_derive_abi_tuple(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
