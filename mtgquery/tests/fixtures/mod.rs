//! Synthetic 10-face, 5-printing corpus shared by the integration tests,
//! covering the canonical end-to-end scenarios: color/type intersection,
//! DFC canonical collapse, cross-domain AND promotion, and tilde-aware
//! regex matching.

use mtgquery::color::{BLACK, BLUE, GREEN, RED, WHITE};
use mtgquery::index::{format_bit, CardIndex, FaceData, Finish, PrintingData, PrintingIndex, SetInfo, FLAG_RESERVED};

pub fn card_index() -> CardIndex {
    CardIndex::build(FaceData {
        name: vec![
            "Elvish Mystic",
            "Lightning Bolt",
            "Counterspell",
            "Giant Growth",
            "Yavimaya Elder",
            "Goblin Guide",
            "Serra Angel",
            "Hall of Oracles",
            "Phyrexian Relic",
            "Island",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        combined_name: vec![
            "Elvish Mystic",
            "Lightning Bolt",
            "Counterspell",
            "Giant Growth",
            "Yavimaya Elder",
            "Goblin Guide",
            "Serra Angel",
            "Hall of Oracles // Phyrexian Relic",
            "Hall of Oracles // Phyrexian Relic",
            "Island",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        mana_cost: vec!["{G}", "{R}", "{U}{U}", "{2}{B}", "{1}{G}", "{R}", "{3}{W}{W}", "", "", ""]
            .into_iter()
            .map(String::from)
            .collect(),
        oracle_text: vec![
            "{T}: Add {G}.",
            "Lightning Bolt deals 3 damage to any target.",
            "Counter target spell unless its controller pays {2}.",
            "Target creature gets +3/+3 until end of turn.",
            "When Yavimaya Elder dies, draw two cards.",
            "Haste",
            "Flying. Serra Angel deals 4 damage to target creature.",
            "",
            "",
            "",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        oracle_text_tilde: vec![
            "{T}: Add {G}.",
            "~ deals 3 damage to any target.",
            "Counter target spell unless its controller pays {2}.",
            "Target creature gets +3/+3 until end of turn.",
            "When ~ dies, draw two cards.",
            "Haste",
            "Flying. ~ deals 4 damage to target creature.",
            "",
            "",
            "",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        colors: vec![GREEN, RED, BLUE, BLACK, GREEN, RED, WHITE, 0, 0, 0],
        color_identity: vec![GREEN, RED, BLUE, BLACK, GREEN, RED, WHITE, 0, 0, 0],
        type_line: vec![
            "Creature — Elf Druid",
            "Instant",
            "Instant",
            "Instant",
            "Creature — Elf",
            "Creature — Goblin",
            "Creature — Angel",
            "Land",
            "Artifact — Phyrexian Relic",
            "Basic Land — Island",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        power: vec![None; 10],
        toughness: vec![None; 10],
        loyalty: vec![None; 10],
        defense: vec![None; 10],
        legalities_legal: {
            let mut v = vec![0u32; 10];
            v[1] = 1 << format_bit("legacy").unwrap();
            v
        },
        legalities_banned: vec![0; 10],
        legalities_restricted: vec![0; 10],
        card_index: vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 8],
        canonical_face: vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 9],
        scryfall_id: (0..10).map(|i| format!("f{i}")).collect(),
        layout: vec![
            "normal", "normal", "normal", "normal", "normal", "normal", "normal", "transform",
            "transform", "normal",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        flags: {
            let mut v = vec![0u16; 10];
            v[2] = FLAG_RESERVED;
            v
        },
        power_dict: vec![],
        toughness_dict: vec![],
        loyalty_dict: vec![],
        defense_dict: vec![],
    })
}

pub fn printing_index(card_index: &CardIndex) -> PrintingIndex {
    PrintingIndex::build(
        PrintingData {
            canonical_face_ref: vec![1, 1, 2, 7, 9],
            scryfall_id: vec!["p0", "p1", "p2", "p3", "p4"].into_iter().map(String::from).collect(),
            collector_number: vec!["141", "141s", "55", "12", "301"]
                .into_iter()
                .map(String::from)
                .collect(),
            set_index: vec![0, 0, 1, 2, 3],
            rarity: vec![0, 0, 1, 2, 0],
            printing_flags: vec![0, 0, 0, 0, 0],
            finish: vec![Finish::Nonfoil, Finish::Foil, Finish::Nonfoil, Finish::Nonfoil, Finish::Nonfoil],
            frame: vec![3, 3, 1, 0, 0],
            price_usd: vec![150, 900, 50, 200, 5],
            released_at: vec![20_220_603, 20_220_603, 20_210_326, 20_200_918, 20_100_101],
            set_lookup: vec![
                SetInfo { code: "mh2".into(), name: "Modern Horizons 2".into(), released_at: 20_220_603 },
                SetInfo { code: "tsr".into(), name: "Time Spiral Remastered".into(), released_at: 20_210_326 },
                SetInfo { code: "znr".into(), name: "Zendikar Rising".into(), released_at: 20_200_918 },
                SetInfo { code: "unset".into(), name: "Some Other Set".into(), released_at: 20_100_101 },
            ],
        },
        card_index,
    )
}
