use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, spanned::Spanned};

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "UniformEnum can only be derived for enums",
        ));
    };

    let mut vars = Vec::new();
    for variant in &data_enum.variants {
        match &variant.fields {
            Fields::Unit => {}
            _ => {
                return Err(syn::Error::new(
                    variant.span(),
                    "UniformEnum only supports fieldless variants",
                ));
            }
        }
        let ident = &variant.ident;
        vars.push(quote! { Self::#ident });
    }

    Ok(quote! {
        impl vosetables::UniformEnum for #enum_ident {
            const VARS: &'static [Self] = &[
                #(#vars),*
            ];
        }

        impl #enum_ident {
            /// Zero-storage uniform table over all variants.
            pub fn uniform_table() -> ::core::result::Result<
                vosetables::StaticTable<vosetables::UniformSampler, Self>,
                vosetables::WeightError,
            >
            where
                Self: Copy,
            {
                <Self as vosetables::UniformEnum>::uniform_table()
            }
        }
    })
}
