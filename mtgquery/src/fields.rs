//! §4.4 field/keyword canonicalization: maps user-typed field names to the
//! canonical names the leaf evaluators dispatch on.

/// A resolved field, split by the domain its leaf evaluator reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    // Face domain
    Name,
    Oracle,
    Type,
    Color,
    Identity,
    Power,
    Toughness,
    Loyalty,
    Defense,
    ManaValue,
    Mana,
    Legal,
    Banned,
    Restricted,
    Is,
    // Printing domain
    Set,
    Rarity,
    Price,
    CollectorNumber,
    Frame,
    Year,
    Date,
}

impl CanonicalField {
    pub fn is_printing_domain(self) -> bool {
        matches!(
            self,
            CanonicalField::Set
                | CanonicalField::Rarity
                | CanonicalField::Price
                | CanonicalField::CollectorNumber
                | CanonicalField::Frame
                | CanonicalField::Year
                | CanonicalField::Date
        )
    }
}

/// Resolve a user-typed field name (already lowercased by the caller) to its
/// canonical field, or `None` for an unrecognized name.
pub fn resolve_field(raw: &str) -> Option<CanonicalField> {
    use CanonicalField::*;
    Some(match raw {
        "name" | "n" => Name,
        "oracle" | "o" => Oracle,
        "type" | "t" => Type,
        "color" | "c" => Color,
        "identity" | "id" | "ci" | "commander" | "cmd" => Identity,
        "power" | "pow" => Power,
        "toughness" | "tou" => Toughness,
        "loyalty" | "loy" => Loyalty,
        "defense" | "def" => Defense,
        "cmc" | "mv" | "manavalue" => ManaValue,
        "mana" | "m" => Mana,
        "legal" | "f" | "format" => Legal,
        "banned" => Banned,
        "restricted" => Restricted,
        "is" => Is,
        "set" | "s" | "e" | "edition" => Set,
        "rarity" | "r" => Rarity,
        "price" | "usd" => Price,
        "cn" | "number" | "collectornumber" => CollectorNumber,
        "frame" => Frame,
        "year" => Year,
        "date" => Date,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_same_canonical() {
        assert_eq!(resolve_field("n"), resolve_field("name"));
        assert_eq!(resolve_field("o"), resolve_field("oracle"));
        assert_eq!(resolve_field("id"), resolve_field("ci"));
        assert_eq!(resolve_field("cmc"), resolve_field("mv"));
        assert_eq!(resolve_field("s"), resolve_field("set"));
        assert_eq!(resolve_field("r"), resolve_field("rarity"));
    }

    #[test]
    fn unknown_field_is_none() {
        assert_eq!(resolve_field("bogus"), None);
    }

    #[test]
    fn printing_domain_classification() {
        assert!(CanonicalField::Set.is_printing_domain());
        assert!(CanonicalField::Price.is_printing_domain());
        assert!(!CanonicalField::Oracle.is_printing_domain());
        assert!(!CanonicalField::Is.is_printing_domain());
    }
}
