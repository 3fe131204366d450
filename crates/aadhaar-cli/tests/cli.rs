use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lopdf::content::{Content, Operation};
use lopdf::{
    dictionary, Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions, Stream,
    StringFormat,
};
use predicates::prelude::*;
use tempfile::TempDir;

const PHOTO: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01];

/// One page of text lines followed by a page holding `PHOTO`.
fn card_document(lines: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), (750 - 14 * i as i64).into()]),
            Operation::new("Tj", vec![Object::string_literal(*line)]),
            Operation::new("ET", vec![]),
        ]);
    }
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations }.encode().unwrap(),
    ));
    let text_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });

    let photo_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "Filter" => "DCTDecode",
        },
        PHOTO.to_vec(),
    ));
    let photo_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => dictionary! { "XObject" => dictionary! { "Im1" => photo_id } },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(text_page), Object::from(photo_page)],
            "Count" => 2,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn write_card_pdf(path: &Path, lines: &[&str]) {
    card_document(lines).save(path).unwrap();
}

/// Same card, RC4 40-bit encrypted for `user_password`.
fn write_encrypted_card_pdf(path: &Path, lines: &[&str], user_password: &str) {
    let mut doc = card_document(lines);
    let id = Object::String(b"kyc-card-fixture".to_vec(), StringFormat::Literal);
    doc.trailer.set("ID", vec![id.clone(), id]);

    let state = EncryptionState::try_from(EncryptionVersion::V1 {
        document: &doc,
        owner_password: "owner-secret",
        user_password,
        permissions: Permissions::all(),
    })
    .unwrap();
    doc.encrypt(&state).unwrap();
    doc.save(path).unwrap();
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn card(&self) -> PathBuf {
        let path = self.path("card.pdf");
        write_card_pdf(
            &path,
            &[
                "Enrolment No.: 1234/56789/01234",
                "DOB: 05/11/1990",
                "MALE",
                "1234 5678 9012",
            ],
        );
        path
    }

    fn encrypted_card(&self, password: &str) -> PathBuf {
        let path = self.path("locked.pdf");
        write_encrypted_card_pdf(&path, &["Enrolment No.: 1234/56789/01234", "MALE"], password);
        path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("aadhaar").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.path("xdg"))
            .env("HOME", self.dir.path())
            .env_remove("AADHAAR_PDF_PASSWORD");
        cmd
    }

    fn extract(&self, input: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract")
            .arg(input)
            .arg("--image-dir")
            .arg(self.path("images"))
            .arg("--upload-dir")
            .arg(self.path("uploads"))
            .arg("--base-url")
            .arg("http://kyc.local");
        cmd
    }
}

#[test]
fn extract_prints_fields_and_images() {
    let ws = Workspace::new();
    let card = ws.card();

    let output = ws.extract(&card).assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let details = &json["Aadhaar Details"];
    assert_eq!(details["Enrolment No."], "1234/56789/01234");
    assert_eq!(details["Date of Birth (English)"], "05/11/1990");
    assert_eq!(details["Gender (English)"], "MALE");
    assert_eq!(details["Aadhaar Number"], "1234 5678 9012");
    assert_eq!(details["Name"], serde_json::Value::Null);
    assert_eq!(details["VID"], serde_json::Value::Null);

    assert_eq!(json["Images"], serde_json::json!(["http://kyc.local/images/image_2_1.jpg"]));
    let encoded = json["Images (Base64)"][0].as_str().unwrap();
    let on_disk = fs::read(ws.path("images").join("image_2_1.jpg")).unwrap();
    assert_eq!(BASE64.decode(encoded).unwrap(), on_disk);
    assert_eq!(on_disk, PHOTO.to_vec());

    assert_eq!(fs::read_dir(ws.path("uploads")).unwrap().count(), 0);
}

#[test]
fn extract_dry_run_writes_no_images() {
    let ws = Workspace::new();
    let card = ws.card();

    ws.extract(&card)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("memory://image_2_1.jpg"));

    assert!(!ws.path("images").exists());
}

#[test]
fn extract_text_summary() {
    let ws = Workspace::new();
    let card = ws.card();

    ws.extract(&card)
        .args(["--format", "text", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aadhaar details:"))
        .stdout(predicate::str::contains("1234/56789/01234"))
        .stdout(predicate::str::contains("Date of birth: 1990-11-05"))
        .stdout(predicate::str::contains("Images (1):"));
}

#[test]
fn extract_writes_output_file() {
    let ws = Workspace::new();
    let card = ws.card();
    let out = ws.path("result.json");

    ws.extract(&card)
        .args(["--dry-run", "--pretty", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["Aadhaar Details"]["Mobile"], serde_json::Value::Null);
}

#[test]
fn extract_invalid_pdf_reports_error() {
    let ws = Workspace::new();
    let bogus = ws.path("bogus.pdf");
    fs::write(&bogus, b"definitely not a pdf").unwrap();

    ws.extract(&bogus)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("{\"error\":\"PDF error:"));

    assert_eq!(fs::read_dir(ws.path("uploads")).unwrap().count(), 0);
}

#[test]
fn extract_encrypted_pdf() {
    let ws = Workspace::new();
    let card = ws.encrypted_card("kyc-2024");

    ws.extract(&card)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "PDF is password protected. Please provide a password.",
        ));

    ws.extract(&card)
        .args(["--password", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid password. Please try again."));

    let output = ws
        .extract(&card)
        .args(["--password", "kyc-2024"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["Aadhaar Details"]["Enrolment No."], "1234/56789/01234");
    assert_eq!(json["Aadhaar Details"]["Gender (English)"], "MALE");

    let stored = fs::read(ws.path("images").join("image_2_1.jpg")).unwrap();
    assert_eq!(stored, PHOTO.to_vec());
}

#[test]
fn extract_password_from_environment() {
    let ws = Workspace::new();
    let card = ws.encrypted_card("kyc-2024");

    ws.extract(&card)
        .env("AADHAAR_PDF_PASSWORD", "kyc-2024")
        .assert()
        .success()
        .stdout(predicate::str::contains("1234/56789/01234"));
}

#[test]
fn extract_missing_input() {
    let ws = Workspace::new();

    ws.extract(&ws.path("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_init_get_set() {
    let ws = Workspace::new();
    let config = ws.path("config.json");

    ws.command()
        .args(["--config"])
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    ws.command()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "storage.base_url", "https://kyc.example.com"])
        .assert()
        .success();

    ws.command()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "storage.base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://kyc.example.com"));

    ws.command()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "storage.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_base_url_is_used_by_extract() {
    let ws = Workspace::new();
    let card = ws.card();
    let config = ws.path("config.json");
    fs::write(
        &config,
        format!(
            r#"{{"storage": {{"base_url": "https://cdn.example.com", "images_route": "photos", "image_dir": "{}", "upload_dir": "{}"}}}}"#,
            ws.path("images").display(),
            ws.path("uploads").display()
        ),
    )
    .unwrap();

    ws.command()
        .arg("--config")
        .arg(&config)
        .arg("extract")
        .arg(&card)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://cdn.example.com/photos/image_2_1.jpg"));
}

#[test]
fn malformed_config_is_reported() {
    let ws = Workspace::new();
    let card = ws.card();
    let config = ws.path("config.json");
    fs::write(&config, "{\"storage\": ").unwrap();

    ws.command()
        .arg("--config")
        .arg(&config)
        .arg("extract")
        .arg(&card)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error: "));
}
