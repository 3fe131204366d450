//! Regex patterns for Aadhaar letter fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref ENROLMENT_NO: Regex = Regex::new(
        r"Enrolment No\.: ([\d/]+)"
    ).unwrap();

    // Latin plus the Indic blocks from Devanagari through Lao
    pub static ref NAME: Regex = Regex::new(concat!(
        r"\nTo\n([A-Za-z",
        r"\x{0900}-\x{097F}\x{0980}-\x{09FF}\x{0A00}-\x{0A7F}\x{0A80}-\x{0AFF}",
        r"\x{0B00}-\x{0B7F}\x{0B80}-\x{0BFF}\x{0C00}-\x{0C7F}\x{0C80}-\x{0CFF}",
        r"\x{0D00}-\x{0D7F}\x{0D80}-\x{0DFF}\x{0E00}-\x{0E7F}\x{0E80}-\x{0EFF}",
        r"\s]+)\n",
    )).unwrap();

    pub static ref ADDRESS_LOCAL: Regex = Regex::new(
        r"(?s)पत्ता:\n(.*?)\n\d{4} \d{4} \d{4}"
    ).unwrap();

    pub static ref ADDRESS_ENGLISH: Regex = Regex::new(
        r"(?s)Address:\n(.*?)\n\d{4} \d{4} \d{4}"
    ).unwrap();

    pub static ref AADHAAR_NUMBER: Regex = Regex::new(
        r"\b\d{4} \d{4} \d{4}\b"
    ).unwrap();

    pub static ref VID: Regex = Regex::new(
        r"VID : (\d{4} \d{4} \d{4} \d{4})"
    ).unwrap();

    pub static ref DATE_OF_BIRTH_LOCAL: Regex = Regex::new(concat!(
        r"(?:जन्म तारीख|जन्म तिथि|জন্ম তারিখ|ജനന തിയതി|பிறந்த தேதி|జన్మ తేదీ|",
        r"ಜನ್ಮ ದಿನಾಂಕ|જન્મ તારીખ|ଜନ୍ମ ତାରିଖ|Date of Birth|DOB)",
        r"[:\s]* (\d{2}/\d{2}/\d{4})",
    )).unwrap();

    pub static ref DATE_OF_BIRTH_ENGLISH: Regex = Regex::new(
        r"DOB: (\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref GENDER_LOCAL: Regex = Regex::new(
        r"(पुरुष|महिला)"
    ).unwrap();

    pub static ref GENDER_ENGLISH: Regex = Regex::new(
        r"(?:MALE|FEMALE)"
    ).unwrap();

    pub static ref MOBILE: Regex = Regex::new(
        r"Mobile: (\d+)"
    ).unwrap();

    pub static ref ISSUED_DATE: Regex = Regex::new(
        r"Aadhaar no. issued: (\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DETAILS_AS_ON: Regex = Regex::new(
        r"Details as on: (\d{2}/\d{2}/\d{4})"
    ).unwrap();
}
