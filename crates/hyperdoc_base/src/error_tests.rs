/* 📖 # Why use a separate file for these error tests?

Keeping the tests out of the main error module keeps the module itself focused,
and avoids shifting line numbers in span traces when the tests change.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{HyperdocError, HyperdocResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;

    #[test]
    fn test_error_from_not_found() {
        let error = HyperdocError::not_found("product", "42");

        match error.kind() {
            ErrorKind::NotFound { resource_type, id } => {
                assert_eq!(resource_type, "product");
                assert_eq!(id, "42");
            }
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_error_from_message() {
        let error = HyperdocError::message("something went wrong");

        match error.kind() {
            ErrorKind::Message { message } => {
                assert_eq!(message, "something went wrong");
            }
            _ => panic!("Expected Message variant"),
        }
    }

    #[test]
    fn test_error_context_attachment() {
        let error = HyperdocError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context().len(), 2);
        assert_eq!(error.get_context()[0], "first context");
        assert_eq!(error.get_context()[1], "second context");
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = HyperdocError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_error_display_message_only() {
        let error = HyperdocError::message("test message");
        assert_eq!(error.to_string(), "test message");
    }

    #[test]
    fn test_error_display_with_context() {
        let error = HyperdocError::message("test message").context("operation failed");
        assert_eq!(error.to_string(), "operation failed: test message");
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = HyperdocError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = HyperdocError::not_found("category", "electronics");
        expect!["category 'electronics' not found"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_error_display_invalid_parameter() {
        let error = HyperdocError::invalid_parameter("page[limit]", "not a number");
        expect!["invalid parameter 'page[limit]': not a number"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_error_display_multiple_errors() {
        let errors = vec![
            HyperdocError::message("error 1"),
            HyperdocError::message("error 2"),
        ];
        let error = HyperdocError::new(ErrorKind::Multiple { errors, count: 2 });
        expect!["Multiple errors occurred (2 total): error 1"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_error_from_impl() {
        let kind = ErrorKind::Message {
            message: "test".to_string(),
        };
        let error: HyperdocError = kind.into();
        match error.kind() {
            ErrorKind::Message { message } => {
                assert_eq!(message, "test");
            }
            _ => panic!("Expected Message variant"),
        }
    }

    #[test]
    fn test_error_source_with_cause() {
        let inner = HyperdocError::message("inner error");
        let outer = HyperdocError::message("outer error").caused_by(inner);

        let source = outer.source().expect("cause should be the source");
        assert_eq!(source.to_string(), "inner error");
    }

    #[test]
    fn test_error_source_message() {
        let error = HyperdocError::message("test");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_root_cause_chain() {
        let inner = HyperdocError::not_found("product", "42");
        let middle = HyperdocError::message("lookup failed").caused_by(inner);
        let outer = HyperdocError::message("assembly aborted").caused_by(middle);

        let root = outer.root_cause();
        assert_eq!(root.to_string(), "product '42' not found");
    }

    #[test]
    fn test_error_root_cause_without_source() {
        let error = HyperdocError::message("test");
        // For an error with no source, the root cause is the error itself
        assert_eq!(error.root_cause().to_string(), "test");
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: HyperdocResult<i32> = Ok(42);
        let final_result = result.context("operation failed");
        assert_eq!(final_result.unwrap(), 42);
    }

    #[test]
    fn test_result_ext_context_error() {
        let result: HyperdocResult<i32> = Err(Box::new(HyperdocError::message("original")));
        let final_result = result.context("operation failed");
        assert!(final_result.is_err());
        let err = final_result.unwrap_err();
        assert_eq!(err.to_string(), "operation failed: original");
    }

    #[test]
    fn test_result_ext_with_context_error() {
        let result: HyperdocResult<i32> = Err(Box::new(HyperdocError::message("original")));
        let final_result = result.with_context(|| "lazy context".to_string());
        assert!(final_result.is_err());
        let err = final_result.unwrap_err();
        assert_eq!(err.to_string(), "lazy context: original");
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: HyperdocResult<i32> = Err(Box::new(HyperdocError::message("root")));
        let final_result = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string());
        assert!(final_result.is_err());
        let err = final_result.unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }

    #[test]
    fn test_multiple_errors_count() {
        let errors = vec![
            HyperdocError::message("error 1"),
            HyperdocError::message("error 2"),
        ];
        let error = HyperdocError::new(ErrorKind::Multiple { errors, count: 2 });
        match error.kind() {
            ErrorKind::Multiple { count, .. } => {
                assert_eq!(count, &2);
            }
            _ => panic!("Expected Multiple variant"),
        }
    }
}
