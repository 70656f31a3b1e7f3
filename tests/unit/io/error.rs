//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tileforge::ForgeError;
    use tileforge::io::error::{invalid_catalog, invalid_parameter};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ForgeError::FileSystem {
            path: "/tmp/catalog.json".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(invalid_catalog(&"empty").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("width", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests invariant violations name the operation and cell
    #[test]
    fn test_invariant_violation_message() {
        let error = ForgeError::InvariantViolation {
            operation: "assign",
            cell: 17,
            reason: "cell is already collapsed".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("assign"));
        assert!(message.contains("cell 17"));
    }

    // Tests JSON errors keep the parse error as source and name the document
    // Verified by excluding source error from message
    #[test]
    fn test_json_format_error() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = ForgeError::JsonFormat {
            document: "layout",
            path: "tiles.json".into(),
            source,
        };

        let message = error.to_string();
        assert!(message.contains("tiles.json"));
        assert!(message.contains("layout"));
        assert!(!message.contains("catalog"));
        assert!(error.source().is_some());
        assert!(error.is_config_error());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = ForgeError::ImageExport {
            path: "/tmp/preview.png".into(),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/tmp/preview.png"));
        assert!(message.contains("access denied"));
        assert!(!error.is_config_error());
    }

    // Tests only input problems count as configuration errors
    #[test]
    fn test_config_error_classification() {
        assert!(invalid_catalog(&"duplicate tile id 3").is_config_error());
        assert!(
            !ForgeError::InvalidTileIndex {
                index: 9,
                max_tiles: 4,
            }
            .is_config_error()
        );
    }
}
