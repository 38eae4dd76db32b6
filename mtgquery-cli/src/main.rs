//! Debug CLI: evaluates a query against an embedded fixture corpus and
//! prints the result tree (and optionally the canonicalized query) as JSON.

use clap::Parser;
use mtgquery::color::{GREEN, RED, WHITE};
use mtgquery::index::{CardIndex, Finish, PrintingData, PrintingIndex, SetInfo};
use mtgquery::{canonicalize::canonicalize, parse, sort, FaceData, NodeCache};

#[derive(Parser, Debug)]
#[command(name = "mtgquery-cli", about = "Evaluate mtgquery queries against an embedded fixture corpus")]
struct Args {
    /// Query string, e.g. `c:g t:creature`
    query: String,

    /// Print the canonicalized form of the query instead of evaluating it
    #[arg(long)]
    canonicalize: bool,

    /// Load the embedded printing fixture before evaluating
    #[arg(long)]
    with_printings: bool,

    /// Seed string for the post-evaluation sort
    #[arg(long, default_value = "mtgquery-cli")]
    seed: String,

    /// Session salt for the post-evaluation sort
    #[arg(long, default_value_t = 0)]
    salt: u32,
}

fn fixture_cards() -> CardIndex {
    CardIndex::build(FaceData {
        name: vec!["Elvish Mystic", "Lightning Bolt", "Counterspell", "Serra Angel"]
            .into_iter()
            .map(String::from)
            .collect(),
        combined_name: vec!["Elvish Mystic", "Lightning Bolt", "Counterspell", "Serra Angel"]
            .into_iter()
            .map(String::from)
            .collect(),
        mana_cost: vec!["{G}", "{R}", "{U}{U}", "{3}{W}{W}"].into_iter().map(String::from).collect(),
        oracle_text: vec![
            "{T}: Add {G}.",
            "Lightning Bolt deals 3 damage to any target.",
            "Counter target spell unless its controller pays {2}.",
            "Flying",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        oracle_text_tilde: vec![
            "{T}: Add {G}.",
            "~ deals 3 damage to any target.",
            "Counter target spell unless its controller pays {2}.",
            "Flying",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        colors: vec![GREEN, RED, 0b10, WHITE],
        color_identity: vec![GREEN, RED, 0b10, WHITE],
        type_line: vec!["Creature — Elf Druid", "Instant", "Instant", "Creature — Angel"]
            .into_iter()
            .map(String::from)
            .collect(),
        power: vec![None; 4],
        toughness: vec![None; 4],
        loyalty: vec![None; 4],
        defense: vec![None; 4],
        legalities_legal: vec![0; 4],
        legalities_banned: vec![0; 4],
        legalities_restricted: vec![0; 4],
        card_index: vec![0, 1, 2, 3],
        canonical_face: vec![0, 1, 2, 3],
        scryfall_id: vec!["f0", "f1", "f2", "f3"].into_iter().map(String::from).collect(),
        layout: vec!["normal"; 4].into_iter().map(String::from).collect(),
        flags: vec![0, 0, 0, 0],
        power_dict: vec![],
        toughness_dict: vec![],
        loyalty_dict: vec![],
        defense_dict: vec![],
    })
}

fn fixture_printings(card_index: &CardIndex) -> PrintingIndex {
    PrintingIndex::build(
        PrintingData {
            canonical_face_ref: vec![1, 2],
            scryfall_id: vec!["p0", "p1"].into_iter().map(String::from).collect(),
            collector_number: vec!["141", "55"].into_iter().map(String::from).collect(),
            set_index: vec![0, 0],
            rarity: vec![0, 1],
            printing_flags: vec![0, 0],
            finish: vec![Finish::Nonfoil, Finish::Foil],
            frame: vec![3, 3],
            price_usd: vec![150, 250],
            released_at: vec![20_220_603, 20_220_603],
            set_lookup: vec![SetInfo {
                code: "mh2".into(),
                name: "Modern Horizons 2".into(),
                released_at: 20_220_603,
            }],
        },
        card_index,
    )
}

fn main() {
    tracing_subscriber::fmt::try_init().ok();

    let args = Args::parse();
    let ast = parse(&args.query);

    if args.canonicalize {
        println!("{}", canonicalize(&ast));
        return;
    }

    let card_index = fixture_cards();
    let printing_index = args.with_printings.then(|| fixture_printings(&card_index));

    let mut cache = NodeCache::new(&card_index, printing_index.as_ref());
    let mut out = cache.evaluate(&ast);

    let bare_words = {
        let mut words = Vec::new();
        ast.collect_bare_words(false, &mut words);
        words
    };
    sort::seeded_sort_faces(&mut out.face_indices, &args.seed, args.salt, &bare_words, &card_index.names_lower);

    match serde_json::to_string_pretty(&out) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize result: {e}"),
    }
}
