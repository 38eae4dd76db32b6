//! §4.5 `is:` keyword tables: canonical keyword resolution plus the
//! reserved-but-unimplemented set that produces `unsupported keyword "<k>"`
//! rather than `unknown keyword "<k>"`.

/// A resolved `is:` keyword. Face-domain keywords are evaluated directly by
/// `engine::leaves::face`; printing-only keywords require a `PrintingIndex`
/// and are evaluated by `engine::leaves::printing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsKeyword {
    Permanent,
    Spell,
    Historic,
    Party,
    Outlaw,
    Transform,
    Modal,
    Dfc,
    Meld,
    Adventure,
    Split,
    Leveler,
    Flip,
    Vanilla,
    FrenchVanilla,
    Commander,
    Companion,
    Partner,
    Bear,
    Reserved,
    Funny,
    UniversesBeyond,
    Hybrid,
    Phyrexian,

    // Curated land cycles
    Dual,
    Shockland,
    Fetchland,
    Checkland,
    Fastland,
    Painland,
    Slowland,
    Bounceland,
    Bikeland,
    Bondland,
    Canopyland,
    Creatureland,
    Filterland,
    Gainland,
    Pathway,
    Scryland,
    Surveilland,
    Shadowland,
    Storageland,
    Tangoland,
    Tricycleland,
    Triland,

    // Printing-only
    Foil,
    Nonfoil,
    Etched,
    FullArt,
    Textless,
    Reprint,
    Promo,
    Digital,
    Hires,
    Borderless,
    Extended,
}

impl IsKeyword {
    pub fn is_printing_only(self) -> bool {
        use IsKeyword::*;
        matches!(
            self,
            Foil | Nonfoil | Etched | FullArt | Textless | Reprint | Promo | Digital | Hires
                | Borderless | Extended
        )
    }
}

/// Reserved keywords that are recognized as real Scryfall keywords but not
/// implemented by this engine; these produce `unsupported keyword "<k>"`
/// rather than `unknown keyword "<k>"`.
pub const UNSUPPORTED: &[&str] = &["spotlight", "datestamped", "masterpiece"];

pub fn resolve_keyword(raw: &str) -> Option<IsKeyword> {
    use IsKeyword::*;
    Some(match raw.to_lowercase().as_str() {
        "permanent" => Permanent,
        "spell" => Spell,
        "historic" => Historic,
        "party" => Party,
        "outlaw" => Outlaw,
        "transform" => Transform,
        "modal" | "mdfc" => Modal,
        "dfc" => Dfc,
        "meld" => Meld,
        "adventure" => Adventure,
        "split" => Split,
        "leveler" => Leveler,
        "flip" => Flip,
        "vanilla" => Vanilla,
        "frenchvanilla" => FrenchVanilla,
        "commander" | "brawler" => Commander,
        "companion" => Companion,
        "partner" => Partner,
        "bear" => Bear,
        "reserved" => Reserved,
        "funny" => Funny,
        "universesbeyond" => UniversesBeyond,
        "hybrid" => Hybrid,
        "phyrexian" => Phyrexian,

        "dual" => Dual,
        "shockland" => Shockland,
        "fetchland" => Fetchland,
        "checkland" => Checkland,
        "fastland" => Fastland,
        "painland" => Painland,
        "slowland" => Slowland,
        "bounceland" | "karoo" => Bounceland,
        "bikeland" | "cycleland" | "bicycleland" => Bikeland,
        "bondland" | "crowdland" | "battlebondland" => Bondland,
        "canopyland" | "canland" => Canopyland,
        "creatureland" | "manland" => Creatureland,
        "filterland" => Filterland,
        "gainland" => Gainland,
        "pathway" => Pathway,
        "scryland" => Scryland,
        "surveilland" => Surveilland,
        "shadowland" | "snarl" => Shadowland,
        "storageland" => Storageland,
        "tangoland" | "battleland" => Tangoland,
        "tricycleland" | "trikeland" | "triome" => Tricycleland,
        "triland" => Triland,

        "foil" => Foil,
        "nonfoil" => Nonfoil,
        "etched" => Etched,
        "full" | "fullart" => FullArt,
        "textless" => Textless,
        "reprint" => Reprint,
        "promo" => Promo,
        "digital" => Digital,
        "hires" => Hires,
        "borderless" => Borderless,
        "extended" => Extended,

        _ => return None,
    })
}
