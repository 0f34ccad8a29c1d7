use super::*;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("endscript-rs-{}-{}", name, nanos))
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn sample_launch() -> Launch {
    Launch {
        usage: "Modder".to_string(),
        game: "Carbon".to_string(),
        directory: r"C:\Games\NFS Carbon".to_string(),
        endscript: r"scripts\install.end".to_string(),
        files: vec![r"GLOBAL\GlobalB.lzc".to_string(), "NFSC.exe".to_string()],
        links: vec![
            SubLoader {
                load_type: "BinKeys".to_string(),
                path_type: PathType::Relative,
                file: r"keys\bin.txt".to_string(),
            },
            SubLoader {
                load_type: "Labels".to_string(),
                path_type: PathType::Absolute,
                file: r"LANGUAGES\Labels.txt".to_string(),
            },
        ],
        this_dir: PathBuf::new(),
    }
}

#[test]
fn defaults_match_a_user_launch() {
    let launch = Launch::default();
    assert_eq!(launch.usage_id(), Usage::User);
    assert_eq!(launch.game_id(), GameId::None);
    assert!(launch.files.is_empty() && launch.links.is_empty());
}

#[test]
fn ids_parse_leniently() {
    let launch = Launch {
        usage: "Tester".to_string(),
        game: "Rivals".to_string(),
        ..Launch::default()
    };
    assert_eq!(launch.usage_id(), Usage::Invalid);
    assert_eq!(launch.game_id(), GameId::None);

    let launch = sample_launch();
    assert_eq!(launch.usage_id(), Usage::Modder);
    assert_eq!(launch.game_id(), GameId::Carbon);
}

#[test]
fn envelope_round_trip_keeps_windows_paths() {
    let launch = sample_launch();

    let text = to_envelope(&launch, true).expect("envelope");
    assert!(text.starts_with("[VERSN1]\n\n{"));
    assert!(text.contains(r#""Directory": "C:\Games\NFS Carbon""#));
    assert!(!text.contains(r"\\"));
    assert!(!text.contains("ThisDir"));

    let decoded = from_envelope(&text, true).expect("decode");
    assert_eq!(decoded, launch);

    let launcher = to_envelope(&launch, false).expect("launcher envelope");
    assert!(launcher.starts_with('{'));
    assert_eq!(from_envelope(&launcher, false).expect("decode"), launch);
}

#[test]
fn versioned_envelope_requires_marker() {
    let error = from_envelope("{}", true).expect_err("missing marker");
    assert_eq!(error.kind, es_core::ErrorKind::UnsupportedVersion(1));

    let launch = from_envelope("\u{feff}[VERSN1]\r\n\r\n{ \"Game\": \"Prostreet\" }", true)
        .expect("minimal descriptor");
    assert_eq!(launch.game_id(), GameId::Prostreet);
    assert_eq!(launch.usage, "User");

    let error = from_envelope("[VERSN1]\n{ \"Files\": 3 }", true).expect_err("bad shape");
    assert_eq!(error.code(), "LAUNCH_FORMAT");
}

#[test]
fn file_codec_round_trip_sets_this_dir() {
    let root = temp_path("launch");
    fs::create_dir_all(&root).expect("root");
    let launch = sample_launch();

    for name in ["mod.end", "mod.endlauncher"] {
        let path = root.join(name);
        serialize(&path, &launch).expect("serialize");
        let raw = fs::read_to_string(&path).expect("read back");
        assert_eq!(raw.starts_with("[VERSN1]"), name == "mod.end");

        let decoded = deserialize(&path).expect("deserialize");
        assert_eq!(decoded.this_dir, root);
        assert_eq!(decoded.clone().with_this_dir(""), launch);
    }

    assert!(is_versioned(Path::new("a.json")));
    assert!(!is_versioned(Path::new("a.EndLauncher")));

    let error = deserialize(root.join("missing.end")).expect_err("missing");
    assert_eq!(error.code(), "FILE_NOT_FOUND");
}

#[test]
fn checks_validate_endscript_and_files() {
    let root = temp_path("launch-checks");
    let game = root.join("game");
    write_file(&root.join("scripts/install.end"), "[VERSN2]\n");
    write_file(&game.join("GLOBAL/GlobalB.lzc"), "");

    let mut launch = sample_launch().with_this_dir(&root);
    launch.directory = game.to_string_lossy().to_string();
    launch.files = vec![r"GLOBAL\GlobalB.lzc".to_string()];

    launch.check_endscript().expect("endscript exists");
    launch.check_files().expect("files exist");
    assert!(launch.endscript_path().ends_with("scripts/install.end"));

    launch.files.push("NFSC.exe".to_string());
    let error = launch.check_files().expect_err("missing exe");
    match &error.kind {
        es_core::ErrorKind::FileNotFound(path) => assert!(path.ends_with("NFSC.exe")),
        other => panic!("unexpected error: {other:?}"),
    }

    launch.endscript = "other.end".to_string();
    assert_eq!(
        launch.check_endscript().expect_err("missing").code(),
        "FILE_NOT_FOUND"
    );
}

#[derive(Default)]
struct Loaded(Vec<(LinkType, PathBuf, GameId)>);

impl LinkLoader for Loaded {
    fn load(&mut self, link: &ResolvedLink, game: GameId) -> Result<(), EndscriptError> {
        self.0.push((link.link_type, link.path.clone(), game));
        Ok(())
    }
}

#[test]
fn links_resolve_by_path_type() {
    let mut launch = sample_launch().with_this_dir("/mods/pack");
    launch.directory = "/games/carbon".to_string();

    let mut loaded = Loaded::default();
    launch.load_links(&mut loaded).expect("links");
    assert_eq!(
        loaded.0,
        vec![
            (
                LinkType::BinKeys,
                PathBuf::from("/mods/pack/keys/bin.txt"),
                GameId::Carbon
            ),
            (
                LinkType::Labels,
                PathBuf::from("/games/carbon/LANGUAGES/Labels.txt"),
                GameId::Carbon
            ),
        ]
    );
}

#[test]
fn unknown_link_type_fails_before_loading() {
    let mut launch = sample_launch();
    launch.links.push(SubLoader {
        load_type: "Textures".to_string(),
        path_type: PathType::Relative,
        file: "x".to_string(),
    });

    let mut loaded = Loaded::default();
    let error = launch.load_links(&mut loaded).expect_err("unknown type");
    assert_eq!(error.code(), "INVALID_ARGUMENT");
    assert!(loaded.0.is_empty());
}
