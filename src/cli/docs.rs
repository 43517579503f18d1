//! Reference content for the cardq `fields` command

use crate::ast::{FieldOperation, SearchField};

const SYNTAX_DOC: &str = r#"OPERATORS

  :  =              Equal
  !=                Not equal
  <  >  <=  >=      Ordered comparison

SYNTAX

  blood             Bare word, searches the card name
  "Destroy all"     Quoted phrase, searches the card name
  t:flame           Field predicate
  a b               Implicit AND
  a AND b           Explicit AND
  a OR b            OR, binds looser than AND
  NOT a   -a        Negation
  (a OR b) c        Grouping

Unknown fields and operators are accepted and searched broadly.
"#;

/// Field alias table followed by operator and syntax notes
pub fn get_fields_reference() -> String {
    let mut out = String::from("FIELDS\n\n");

    let mut fields: Vec<SearchField> = Vec::new();
    for (_, field) in SearchField::ALIASES {
        if !fields.contains(field) {
            fields.push(*field);
        }
    }

    for field in fields {
        let aliases: Vec<&str> = SearchField::ALIASES
            .iter()
            .filter(|(_, f)| *f == field)
            .map(|(alias, _)| *alias)
            .collect();
        out.push_str(&format!("  {:<16}  {}\n", field.to_string(), aliases.join(", ")));
    }
    out.push_str(&format!(
        "  {:<16}  (implicit, bare terms use {}{})\n\n",
        SearchField::Name.to_string(),
        SearchField::Name,
        FieldOperation::Eq
    ));

    out.push_str(SYNTAX_DOC);
    out
}
