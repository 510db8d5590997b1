use proc_macro::{Literal, TokenStream, TokenTree};

/// Like stringify!() but converts a CamelCase ident to snake_case.
///
/// Digits stay glued to the word before them.
///
/// # Example
/// ```
/// # use frame_base_proc_snake::snake;
/// assert_eq!(snake!(FlagQuery), "flag_query");
/// assert_eq!(snake!(Dup), "dup");
/// assert_eq!(snake!(Base16Dump), "base16_dump");
/// ```
#[proc_macro]
pub fn snake(stream: TokenStream) -> TokenStream {
    let ident = stream.to_string();
    let mut s = String::with_capacity(ident.len() + 4);

    for (i, c) in ident.trim().chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                s.push('_');
            }
            s.push(c.to_ascii_lowercase());
        } else {
            s.push(c);
        }
    }

    TokenTree::Literal(Literal::string(&s)).into()
}
