//! Parsing, editing and round-tripping whole decks.

use sof_dat::{DatError, DatFile, ProgType, SysDirective};

const DECK: &str = "\
+PROG AQUA
HEAD MATERIALS
CONC 1 C 30
END

-prog ase
head Dead Load
LC 1
END

+SYS DEL $(NAME).PLB

!+!CHAPTER STAGE ONE

+PROG ASE
HEAD STAGE 1
LC 10
END

*SYS COPY A B
";

fn parsed() -> DatFile {
    DatFile::parse_str("model.dat", DECK).expect("deck should parse")
}

#[test]
fn detects_top_level_structure_in_file_order() {
    let deck = parsed();
    assert_eq!(
        deck.content_names(),
        ["MATERIALS", "DEAD LOAD", "+SYS DEL $(NAME).PLB", "STAGE ONE"]
    );
    assert!(deck.has_program("materials"));
    assert!(deck.has_directive("+SYS DEL $(NAME).PLB"));
    assert!(deck.has_chapter("Stage One"));
    assert_eq!(deck.program_index("dead load").expect("index"), 1);
}

#[test]
fn programs_keep_their_state_and_type() {
    let deck = parsed();
    let materials = deck.program("MATERIALS").expect("materials");
    assert!(materials.is_active());
    assert_eq!(materials.prog_type(), ProgType::Aqua);

    let dead_load = deck.program("DEAD LOAD").expect("dead load");
    assert!(!dead_load.is_active());
    assert_eq!(dead_load.prog_type(), ProgType::Ase);
    // Content is normalized to uppercase.
    assert_eq!(dead_load.row(2).expect("lc row"), "LC 1");
}

#[test]
fn chapter_members_are_attached_to_the_chapter() {
    let deck = parsed();
    let chapter = deck.chapter("STAGE ONE").expect("chapter");
    assert!(chapter.is_active());
    assert!(chapter.has_program("STAGE 1"));
    assert!(chapter.has_directive("*SYS COPY A B"));
    assert_eq!(
        chapter.last_program().expect("last program").name(),
        "STAGE 1"
    );
    // Chapter members do not leak into the top level.
    assert!(deck.program("STAGE 1").is_err());
}

#[test]
fn original_content_is_preserved_verbatim() {
    let deck = parsed();
    assert_eq!(deck.original_content()[5], "-prog ase");
    assert_eq!(deck.original_content()[6], "head Dead Load");
}

#[test]
fn serialize_round_trips_through_the_parser() {
    let deck = parsed();
    let serialized = deck.serialize();
    let reparsed =
        DatFile::parse_str("model.dat", &serialized).expect("serialized deck should parse");
    assert_eq!(reparsed.serialize(), serialized);
    assert_eq!(reparsed.content_names(), deck.content_names());
}

#[test]
fn turn_off_cascades_through_the_whole_deck() {
    let mut deck = parsed();
    deck.turn_off();

    assert!(!deck.program("MATERIALS").expect("materials").is_active());
    assert!(deck.directive("-SYS DEL $(NAME).PLB").expect("directive").is_off());
    let chapter = deck.chapter("STAGE ONE").expect("chapter");
    assert!(!chapter.is_active());
    assert!(!chapter.program("STAGE 1").expect("stage 1").is_active());

    deck.turn_on();
    assert!(deck.program("DEAD LOAD").expect("dead load").is_active());
}

#[test]
fn editing_a_program_is_visible_in_the_serialized_deck() {
    let mut deck = parsed();
    deck.program_mut("DEAD LOAD")
        .expect("dead load")
        .insert_row_after("GRP 2", "LC 1")
        .expect("target row exists");

    assert!(deck.serialize().contains("LC 1\nGRP 2"));
}

#[test]
fn adding_content_enforces_unique_names() {
    let mut deck = parsed();
    deck.create_new_program("CHECKS", ProgType::Maxima, true)
        .expect("new program");
    let duplicate = deck.create_new_program("checks", ProgType::Maxima, true);
    assert!(matches!(duplicate, Err(DatError::DuplicateProgram { .. })));

    deck.add_chapter("STAGE TWO").expect("new chapter");
    assert!(matches!(
        deck.add_chapter("stage two"),
        Err(DatError::DuplicateChapter { .. })
    ));

    let directive = SysDirective::from_line("+SYS ECHO DONE").expect("directive");
    deck.add_directive(directive.clone()).expect("new directive");
    assert!(matches!(
        deck.add_directive(directive),
        Err(DatError::DuplicateDirective { .. })
    ));
}

#[test]
fn lookups_for_missing_content_carry_the_file_context() {
    let deck = parsed();
    let error = deck.program("NOPE").expect_err("missing program");
    match error {
        DatError::ProgramNotFound { name, context } => {
            assert_eq!(name, "NOPE");
            assert!(context.contains("model.dat"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        deck.chapter("NOPE"),
        Err(DatError::ChapterNotFound { .. })
    ));
}

#[test]
fn save_and_save_original_write_to_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let deck_path = dir.path().join("model.dat");
    std::fs::write(&deck_path, DECK).expect("write fixture");

    let mut deck = DatFile::parse_file(&deck_path).expect("parse from disk");
    deck.program_mut("DEAD LOAD")
        .expect("dead load")
        .turn_on();
    deck.save().expect("save in place");

    let saved = std::fs::read_to_string(&deck_path).expect("read saved deck");
    assert!(saved.contains("+PROG ASE\nHEAD DEAD LOAD"));

    let copy_path = dir.path().join("copy.dat");
    deck.save_as(&copy_path).expect("save as");
    assert_eq!(std::fs::read_to_string(&copy_path).expect("read copy"), saved);

    let original_path = dir.path().join("original.dat");
    deck.save_original_as(&original_path).expect("save original");
    let original = std::fs::read_to_string(&original_path).expect("read original");
    assert!(original.contains("-prog ase"));
    assert!(original.contains("head Dead Load"));
}

#[test]
fn building_a_deck_from_scratch() {
    let mut deck = DatFile::new("generated.dat");
    deck.create_new_program("MESH", ProgType::Sofimsha, true)
        .expect("mesh program");
    deck.create_new_program("ANALYSIS", ProgType::Ase, false)
        .expect("analysis program");

    let serialized = deck.serialize();
    assert!(serialized.starts_with("+PROG SOFIMSHA\n\tHEAD MESH\nEND\n\n"));
    assert!(serialized.contains("-PROG ASE\n\tHEAD ANALYSIS\nEND"));
}
