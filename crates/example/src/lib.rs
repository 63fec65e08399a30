//! Example crate demonstrating enumtab-codegen usage.
//!
//! The newtypes in `codes.rs` carry the `#[derive(Enumtab)]` marker; build.rs
//! scans that file with `CodeGenerator` and the generated accessors are
//! included back into the same module.

mod codes;

pub use codes::{Error, Level, Offset, Shade, Sparse, Status};
pub use enumtab_codegen::runtime::{DecodeError, UnknownNameError};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_single_run() {
        assert_eq!(Error::NotFound.to_string(), "NotFound");
        assert_eq!(Error::WorksOnMyMachine.to_string(), "WorksOnMyMachine");
        assert_eq!(Error(5).to_string(), "Error(5)");
        assert_eq!(Error(-1).to_string(), "Error(-1)");
    }

    #[test]
    fn test_display_offset_run() {
        assert_eq!(Offset::NotFound.to_string(), "NotFound");
        assert_eq!(Offset(104).to_string(), "WorksOnMyMachine");
        assert_eq!(Offset(99).to_string(), "Offset(99)");
        assert_eq!(Offset(105).to_string(), "Offset(105)");
        assert_eq!(Offset(0).to_string(), "Offset(0)");
    }

    #[test]
    fn test_display_multi_run() {
        assert_eq!(Status(100).to_string(), "Accepted");
        assert_eq!(Status(101).to_string(), "Queued");
        assert_eq!(Status(102).to_string(), "Status(102)");
        assert_eq!(Status(103).to_string(), "Running");
        assert_eq!(Status(105).to_string(), "Failed");
        assert_eq!(Status(106).to_string(), "Status(106)");
    }

    #[test]
    fn test_display_map() {
        assert_eq!(Sparse::Abyss.to_string(), "Abyss");
        assert_eq!(Sparse(128).to_string(), "OneTwentyEight");
        assert_eq!(Sparse::Max.to_string(), "Max");
        assert_eq!(Sparse(3).to_string(), "Sparse(3)");
        assert_eq!(Sparse(-11).to_string(), "Sparse(-11)");
    }

    #[test]
    fn test_message() {
        assert_eq!(Error::NotFound.message(), "User could not be found");
        assert_eq!(Error::BadRequestData.message(), "You didn't send a good request");
        assert_eq!(Error(5).message(), "Error(5)");
        assert_eq!(Offset::AlreadyExists.message(), "User already exists");
        assert_eq!(Status::Failed.message(), "Request failed\nand will not be retried");
        assert_eq!(Status(102).message(), "Status(102)");
        assert_eq!(Sparse::Million.message(), "One million");
        // Declared without a doc comment
        assert_eq!(Sparse::Two.message(), "");
    }

    #[test]
    fn test_totality_at_extremes() {
        assert_eq!(Level(i8::MIN).to_string(), "Level(-128)");
        assert_eq!(Level(i8::MAX).message(), "Level(127)");
        assert_eq!(Level::Trace.to_string(), "Trace");
        assert_eq!(Level::Error.to_string(), "Error");
        assert_eq!(Error(i32::MIN).to_string(), "Error(-2147483648)");
        assert_eq!(Error(i32::MAX).to_string(), "Error(2147483647)");
        assert_eq!(Shade(0).to_string(), "Shade(0)");
        assert_eq!(Shade(u8::MAX).to_string(), "Shade(255)");
        assert_eq!(Status(u16::MAX).message(), "Status(65535)");
        assert_eq!(Sparse(i64::MIN).to_string(), "Sparse(-9223372036854775808)");
    }

    #[test]
    fn test_duplicate_keeps_first_declared() {
        assert_eq!(Shade::Pale.to_string(), "Light");
        assert_eq!(Shade::Pale.message(), "The first shade");
        assert_eq!(Shade::from_name("Light"), Ok(Shade(1)));
        assert!(Shade::from_name("Pale").is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Error::from_name("NotSure"), Ok(Error::NotSure));
        assert_eq!(Offset::from_name("NotSure"), Ok(Offset(102)));
        assert_eq!(Status::from_name("Running"), Ok(Status(103)));
        assert_eq!(Sparse::from_name("Max"), Ok(Sparse(i64::MAX)));
        assert_eq!(Level::from_name("Trace"), Ok(Level(-2)));

        let err = Error::from_name("notfound").unwrap_err();
        assert_eq!(err.name(), "notfound");
        assert_eq!(err.type_name(), "Error");
        assert_eq!(
            err.to_string(),
            "\"notfound\" is not the name of a value of type Error"
        );
        assert!(Error::from_name("").is_err());
        assert!(Error::from_name("Error(5)").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Error::from_str("AlreadyExists"), Ok(Error::AlreadyExists));
        assert_eq!("Queued".parse::<Status>(), Ok(Status::Queued));
        assert!("Unknown".parse::<Level>().is_err());
    }

    #[test]
    fn test_name_round_trip() {
        for code in 0..5 {
            let error = Error(code);
            assert_eq!(error.to_string().parse::<Error>(), Ok(error));
        }
        for code in [-1_000, -10, 0, 2, 4, 8, 16, 32, 64, 128, 1_000_000, i64::MAX] {
            let sparse = Sparse(code);
            assert_eq!(Sparse::from_name(&sparse.to_string()), Ok(sparse));
        }
    }

    #[test]
    fn test_serialize_json() {
        assert_eq!(
            serde_json::to_string(&Error::NotFound).unwrap(),
            r#"{"type":"NotFound","message":"User could not be found"}"#
        );
        assert_eq!(
            serde_json::to_string(&Error(7)).unwrap(),
            r#"{"type":"Error(7)","message":"Error(7)"}"#
        );
        assert_eq!(
            serde_json::to_string(&Status::Failed).unwrap(),
            r#"{"type":"Failed","message":"Request failed\nand will not be retried"}"#
        );
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&Offset::BadRequestData).unwrap();
        let back: Offset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Offset::BadRequestData);

        let level: Level = serde_json::from_str(r#"{"name":"Warn"}"#).unwrap();
        assert_eq!(level, Level::Warn);

        assert!(serde_json::from_str::<Level>(r#"{"type":"Loud"}"#).is_err());
        assert!(serde_json::from_str::<Level>(r#"{"type":"Level(3)"}"#).is_err());
    }

    #[test]
    fn test_decode_json() {
        let mut error = Error::NotFound;
        error
            .decode_json(br#"{"type":"WorksOnMyMachine","message":"ignored"}"#)
            .unwrap();
        assert_eq!(error, Error::WorksOnMyMachine);

        error.decode_json(br#"{"name":"NotSure"}"#).unwrap();
        assert_eq!(error, Error::NotSure);
    }

    #[test]
    fn test_decode_json_failure_leaves_value_unchanged() {
        let mut status = Status::Queued;

        let err = status.decode_json(br#"{"type":"Sleeping"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownName(ref e) if e.name() == "Sleeping"));
        assert_eq!(status, Status::Queued);

        let payloads: [&[u8]; 4] = [
            b"not json",
            br#"{"type":3}"#,
            br#"{"message":"no name"}"#,
            br#""Queued""#,
        ];
        for data in payloads {
            let err = status.decode_json(data).unwrap_err();
            assert!(matches!(err, DecodeError::MalformedPayload { .. }), "{err}");
            assert_eq!(status, Status::Queued);
        }
    }
}
