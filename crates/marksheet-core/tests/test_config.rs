use marksheet_core::config::MarksheetConfig;
use marksheet_core::MarksheetError;
use marksheet_types::MailMode;

fn full_config_json() -> &'static str {
    r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "header": ["School of Computing", "Semester 2"],
        "footer": ["Queries to the coordinator:"],
        "max_marks_row": 2,
        "columns": {
            "student_number": "C",
            "first_name": "A",
            "last_name": "B",
            "email": "D",
            "criteria": [
                {"title": "Design", "column": "E"},
                {"title": "Testing", "column": "F"}
            ],
            "total": "G",
            "feedback": "H"
        },
        "mail": {
            "coordinator_email": "coordinator@uni.edu",
            "subject": "Assignment 1 feedback",
            "body": ["Hi,", "", "Your feedback is attached."],
            "smtp": {
                "host": "smtp.uni.edu",
                "port": 587,
                "username": "robot",
                "password": "secret"
            }
        }
    }"#
}

#[test]
fn test_parse_full_config() {
    let config = MarksheetConfig::from_json_str(full_config_json(), MailMode::Students)
        .expect("Failed to parse config");

    assert_eq!(config.assignment, "Assignment 1");
    assert_eq!(config.coordinator, "Dr Example");
    assert_eq!(config.header.len(), 2);
    assert_eq!(config.max_marks_row, 2);

    let mail = config.mail.as_ref().expect("mail section");
    assert_eq!(mail.coordinator_email, "coordinator@uni.edu");
    assert_eq!(mail.smtp.port, 587);

    let columns = config.columns.resolve().expect("resolve columns");
    assert_eq!(columns.student_number, 2);
    assert_eq!(columns.first_name, 0);
    assert_eq!(columns.email, Some(3));
    assert_eq!(
        columns.criteria,
        vec![("Design".to_string(), 4), ("Testing".to_string(), 5)]
    );
    assert_eq!(columns.total, 6);
    assert_eq!(columns.feedback, 7);
}

#[test]
fn test_pdf_only_config_needs_no_mail_section() {
    let json = r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "max_marks_row": 1,
        "columns": {
            "student_number": "C",
            "first_name": "A",
            "last_name": "B",
            "criteria": [{"title": "Design", "column": "D"}],
            "total": "E",
            "feedback": "F"
        }
    }"#;

    let config =
        MarksheetConfig::from_json_str(json, MailMode::Off).expect("Failed to parse config");
    assert!(config.mail.is_none());
    assert!(config.header.is_empty(), "header defaults to no lines");

    // The same document is rejected as soon as mailing is requested
    let result = MarksheetConfig::from_json_str(json, MailMode::Coordinator);
    assert!(matches!(result, Err(MarksheetError::Config(_))));
    assert!(result.unwrap_err().to_string().contains("mail"));
}

#[test]
fn test_missing_required_key_is_fatal() {
    // No "columns" key at all
    let json = r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "max_marks_row": 1
    }"#;

    let result = MarksheetConfig::from_json_str(json, MailMode::Off);
    assert!(matches!(result, Err(MarksheetError::Config(_))));
}

#[test]
fn test_malformed_column_reference_is_fatal() {
    let json = r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "max_marks_row": 1,
        "columns": {
            "student_number": "C3",
            "first_name": "A",
            "last_name": "B",
            "criteria": [{"title": "Design", "column": "D"}],
            "total": "E",
            "feedback": "F"
        }
    }"#;

    let result = MarksheetConfig::from_json_str(json, MailMode::Off);
    assert!(matches!(
        result,
        Err(MarksheetError::InvalidColumnReference(_))
    ));
}

#[test]
fn test_mail_mode_requires_email_column() {
    // Valid mail section but no columns.email mapping
    let json = r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "max_marks_row": 1,
        "columns": {
            "student_number": "C",
            "first_name": "A",
            "last_name": "B",
            "criteria": [{"title": "Design", "column": "D"}],
            "total": "E",
            "feedback": "F"
        },
        "mail": {
            "coordinator_email": "coordinator@uni.edu",
            "subject": "Feedback",
            "smtp": {
                "host": "smtp.uni.edu",
                "username": "robot",
                "password": "secret"
            }
        }
    }"#;

    // Fine without mailing, rejected with it
    assert!(MarksheetConfig::from_json_str(json, MailMode::Off).is_ok());

    let result = MarksheetConfig::from_json_str(json, MailMode::Students);
    assert!(result.unwrap_err().to_string().contains("columns.email"));
}

#[test]
fn test_smtp_port_defaults() {
    let config = MarksheetConfig::from_json_str(
        &full_config_json().replace("\"port\": 587,", ""),
        MailMode::Students,
    )
    .expect("Failed to parse config");

    assert_eq!(config.mail.unwrap().smtp.port, 587, "default SMTP port");
}

#[test]
fn test_empty_criteria_rejected() {
    let json = r#"{
        "assignment": "Assignment 1",
        "coordinator": "Dr Example",
        "max_marks_row": 1,
        "columns": {
            "student_number": "C",
            "first_name": "A",
            "last_name": "B",
            "criteria": [],
            "total": "E",
            "feedback": "F"
        }
    }"#;

    let result = MarksheetConfig::from_json_str(json, MailMode::Off);
    assert!(result.unwrap_err().to_string().contains("criteria"));
}
