use crate::errors::ServiceError;

/// Translate a storage miss (`None`) into the 404 the API contract
/// promises. The storage façade itself never errors on missing ids.
pub fn found<T>(value: Option<T>, entity: &str, id: i32) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::NotFound(format!("{entity} {id} not found")))
}

/// Same translation for delete's boolean found signal.
pub fn deleted(was_deleted: bool, entity: &str, id: i32) -> Result<(), ServiceError> {
    if was_deleted {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("{entity} {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_passes_values_through() {
        assert_eq!(found(Some(7), "bank", 1).unwrap(), 7);
    }

    #[test]
    fn found_translates_none_to_not_found() {
        let err = found::<i32>(None, "bank", 9).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn deleted_translates_false_to_not_found() {
        assert!(deleted(true, "bank", 1).is_ok());
        assert!(matches!(
            deleted(false, "bank", 1).unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }
}
