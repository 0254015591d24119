use proc_macro::TokenStream;

/// Splits the macro input into the function ident and the atom ident string.
fn parse_args(input: TokenStream) -> (String, String) {
    let str = input.to_string();
    let mut tokens_strings = str.split(',');

    let function_ident = tokens_strings
        .next()
        .expect("Expected function ident")
        .trim()
        .replace('"', "");
    let atom_ident_string = tokens_strings
        .next()
        .expect("Expected atom ident string")
        .trim()
        .replace('"', "");

    (function_ident, atom_ident_string)
}

fn headline(name: &str) -> String {
    let mut name_chars = name.chars();
    match name_chars.next() {
        Some(c) => format!("{}{}", c.to_uppercase(), name_chars.collect::<String>()),
        None => String::new(),
    }
}

#[proc_macro]
pub fn text_field_adder(input: TokenStream) -> TokenStream {
    let (function_ident, atom_ident_string) = parse_args(input);
    let name = function_ident.replace('_', " ");
    let atom_ident = format!("atom::{}", function_ident.to_uppercase());

    format!(
        "
/// ### {0}
impl Tag {{
    /// Adds the {1} ({2}) as utf-8 text.
    ///
    /// This must only be called once per tag, a second call adds a second {1} item.
    pub fn add_{3}(&mut self, {3}: &str) -> crate::Result<()> {{
        self.add_meta_atom({4}, data::UTF8, {3}.as_bytes())
    }}
}}
    ",
        headline(&name),
        name,
        atom_ident_string,
        function_ident,
        atom_ident,
    )
    .parse()
    .expect("Generated text field adder should be valid rust")
}

#[proc_macro]
pub fn index_field_adder(input: TokenStream) -> TokenStream {
    let (function_ident, atom_ident_string) = parse_args(input);
    let name = function_ident.replace('_', " ");
    let atom_ident = format!("atom::{}_NUMBER", function_ident.to_uppercase());

    format!(
        "
/// ### {0} number
impl Tag {{
    /// Adds the {1} number ({2}). A number of `0` is written as is, callers that treat `0` as
    /// absent should skip the call.
    ///
    /// This must only be called once per tag, a second call adds a second {1} number item.
    pub fn add_{3}(&mut self, {3}: u16) -> crate::Result<()> {{
        self.add_meta_atom({4}, data::RESERVED, &data::index_payload({3}))
    }}
}}
    ",
        headline(&name),
        name,
        atom_ident_string,
        function_ident,
        atom_ident,
    )
    .parse()
    .expect("Generated index field adder should be valid rust")
}
