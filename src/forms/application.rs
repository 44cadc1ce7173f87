//! Language center application form

use serde::{Deserialize, Serialize};

use super::{
    is_checked, required_email, required_text, FormErrors, FILE_TOO_LARGE_MESSAGE,
    FILE_TYPE_MESSAGE, INVALID_NUMBER_MESSAGE, REQUIRED_MESSAGE, TERMS_MESSAGE,
};
use crate::config::UploadConfig;

/// Text fields of an application, as submitted.
///
/// `study_duration` and `accept_terms` stay raw strings so the page can be
/// re-rendered with exactly what the applicant typed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub nationality: String,
    pub country_of_residence: String,
    pub study_duration: String,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub accept_terms: String,
}

/// A file part from a multipart body
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || self.data.is_empty()
    }

    /// Declared content type, or one guessed from the file extension when
    /// the client sent none or a generic one.
    pub fn effective_content_type(&self) -> String {
        let declared = self.content_type.trim().to_ascii_lowercase();
        if !declared.is_empty() && declared != "application/octet-stream" {
            return declared;
        }

        let extension = std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

/// The three documents attached to an application
#[derive(Debug, Clone, Default)]
pub struct ApplicationUploads {
    pub passport_photo: Option<UploadedFile>,
    pub personal_photo: Option<UploadedFile>,
    pub high_school_certificate: Option<UploadedFile>,
}

/// Application that passed validation; files are not yet stored
#[derive(Debug, Clone)]
pub struct ValidatedApplication {
    pub full_name: String,
    pub nationality: String,
    pub country_of_residence: String,
    pub study_duration: u32,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub passport_photo: UploadedFile,
    pub personal_photo: UploadedFile,
    pub high_school_certificate: UploadedFile,
}

impl ApplicationForm {
    pub fn accepted_terms(&self) -> bool {
        is_checked(&self.accept_terms)
    }

    pub fn validate(
        &self,
        uploads: ApplicationUploads,
        config: &UploadConfig,
    ) -> Result<ValidatedApplication, FormErrors> {
        let mut errors = FormErrors::new();

        let full_name = required_text(&mut errors, "full_name", &self.full_name, 255);
        let nationality = required_text(&mut errors, "nationality", &self.nationality, 100);
        let country_of_residence = required_text(
            &mut errors,
            "country_of_residence",
            &self.country_of_residence,
            150,
        );
        let study_duration = match self.study_duration.trim() {
            "" => {
                errors.add("study_duration", REQUIRED_MESSAGE);
                0
            }
            raw => raw.parse::<u32>().unwrap_or_else(|_| {
                errors.add("study_duration", INVALID_NUMBER_MESSAGE);
                0
            }),
        };
        let email = required_email(&mut errors, "email", &self.email);
        let country_code = required_text(&mut errors, "country_code", &self.country_code, 10);
        let phone_number = required_text(&mut errors, "phone_number", &self.phone_number, 30);

        if !self.accepted_terms() {
            errors.add("accept_terms", TERMS_MESSAGE);
        }

        let passport_photo = check_file(&mut errors, "passport_photo", uploads.passport_photo, config);
        let personal_photo = check_file(&mut errors, "personal_photo", uploads.personal_photo, config);
        let high_school_certificate = check_file(
            &mut errors,
            "high_school_certificate",
            uploads.high_school_certificate,
            config,
        );

        match (passport_photo, personal_photo, high_school_certificate) {
            (Some(passport_photo), Some(personal_photo), Some(high_school_certificate))
                if errors.is_empty() =>
            {
                Ok(ValidatedApplication {
                    full_name,
                    nationality,
                    country_of_residence,
                    study_duration,
                    email,
                    country_code,
                    phone_number,
                    passport_photo,
                    personal_photo,
                    high_school_certificate,
                })
            }
            _ => Err(errors),
        }
    }
}

fn check_file(
    errors: &mut FormErrors,
    field: &str,
    file: Option<UploadedFile>,
    config: &UploadConfig,
) -> Option<UploadedFile> {
    let file = match file {
        Some(file) if !file.is_empty() => file,
        _ => {
            errors.add(field, REQUIRED_MESSAGE);
            return None;
        }
    };

    if file.data.len() as u64 > config.max_file_size {
        errors.add(field, FILE_TOO_LARGE_MESSAGE);
        return None;
    }
    if !config.is_type_allowed(&file.effective_content_type()) {
        errors.add(field, FILE_TYPE_MESSAGE);
        return None;
    }
    Some(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ApplicationForm {
        ApplicationForm {
            full_name: "Ali Hassan".to_string(),
            nationality: "Yemeni".to_string(),
            country_of_residence: "Malaysia".to_string(),
            study_duration: "6".to_string(),
            email: "ali@example.com".to_string(),
            country_code: "+60".to_string(),
            phone_number: "123456789".to_string(),
            accept_terms: "on".to_string(),
        }
    }

    fn file(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![0xff, 0xd8, 0xff, 0xe0],
        }
    }

    fn uploads() -> ApplicationUploads {
        ApplicationUploads {
            passport_photo: Some(file("passport.jpg", "image/jpeg")),
            personal_photo: Some(file("me.png", "image/png")),
            high_school_certificate: Some(file("cert.pdf", "application/pdf")),
        }
    }

    #[test]
    fn test_valid_application() {
        let validated = form().validate(uploads(), &UploadConfig::default()).unwrap();
        assert_eq!(validated.study_duration, 6);
        assert_eq!(validated.passport_photo.file_name, "passport.jpg");
        assert_eq!(validated.high_school_certificate.content_type, "application/pdf");
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let mut form = form();
        form.accept_terms = String::new();
        let errors = form.validate(uploads(), &UploadConfig::default()).unwrap_err();
        assert_eq!(errors.get("accept_terms").unwrap(), [TERMS_MESSAGE.to_string()]);
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_checkbox_variants() {
        for value in ["on", "true", "1", "yes"] {
            let mut form = form();
            form.accept_terms = value.to_string();
            assert!(form.validate(uploads(), &UploadConfig::default()).is_ok(), "{value}");
        }
    }

    #[test]
    fn test_missing_and_empty_files() {
        let mut uploads = uploads();
        uploads.personal_photo = None;
        uploads.high_school_certificate = Some(UploadedFile {
            file_name: String::new(),
            content_type: "application/octet-stream".to_string(),
            data: Vec::new(),
        });

        let errors = form().validate(uploads, &UploadConfig::default()).unwrap_err();
        assert!(errors.has("personal_photo"));
        assert!(errors.has("high_school_certificate"));
        assert!(!errors.has("passport_photo"));
    }

    #[test]
    fn test_file_size_and_type_limits() {
        let config = UploadConfig {
            max_file_size: 3,
            ..UploadConfig::default()
        };
        let errors = form().validate(uploads(), &config).unwrap_err();
        assert_eq!(errors.get("passport_photo").unwrap(), [FILE_TOO_LARGE_MESSAGE.to_string()]);

        let mut uploads = uploads();
        uploads.passport_photo = Some(file("run.exe", "application/x-msdownload"));
        let errors = form().validate(uploads, &UploadConfig::default()).unwrap_err();
        assert_eq!(errors.get("passport_photo").unwrap(), [FILE_TYPE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_content_type_guessed_from_extension() {
        assert_eq!(file("scan.PDF", "").effective_content_type(), "application/pdf");
        assert_eq!(
            file("photo.jpeg", "application/octet-stream").effective_content_type(),
            "image/jpeg"
        );
        assert_eq!(file("photo.webp", "Image/WebP").effective_content_type(), "image/webp");
        assert_eq!(file("noext", "").effective_content_type(), "application/octet-stream");
    }

    #[test]
    fn test_study_duration_must_be_non_negative_integer() {
        for raw in ["-1", "six", "2.5"] {
            let mut form = form();
            form.study_duration = raw.to_string();
            let errors = form.validate(uploads(), &UploadConfig::default()).unwrap_err();
            assert_eq!(errors.get("study_duration").unwrap(), [INVALID_NUMBER_MESSAGE.to_string()]);
        }

        let mut form = form();
        form.study_duration = " 0 ".to_string();
        assert_eq!(form.validate(uploads(), &UploadConfig::default()).unwrap().study_duration, 0);
    }

    #[test]
    fn test_blank_form_reports_text_fields() {
        let errors = ApplicationForm::default()
            .validate(ApplicationUploads::default(), &UploadConfig::default())
            .unwrap_err();
        for field in [
            "full_name",
            "nationality",
            "country_of_residence",
            "study_duration",
            "email",
            "country_code",
            "phone_number",
            "accept_terms",
            "passport_photo",
            "personal_photo",
            "high_school_certificate",
        ] {
            assert!(errors.has(field), "{field}");
        }
    }
}
