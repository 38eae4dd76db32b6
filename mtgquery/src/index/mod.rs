//! §3 data model: the immutable columnar inputs (`FaceData`/`PrintingData`)
//! and the evaluation views built once over them (`CardIndex`/`PrintingIndex`).

mod card;
mod printing;

pub use card::{
    format_bit, CardIndex, FaceData, FLAG_FUNNY, FLAG_RESERVED, FLAG_UNIVERSES_BEYOND, FORMATS,
};
pub use printing::{
    frame_bit, rarity_rank, Finish, PrintingData, PrintingIndex, SetInfo, BORDERLESS, DIGITAL,
    EXTENDED_ART, FULL_ART, HIRES, PROMO, REPRINT, TEXTLESS,
};
