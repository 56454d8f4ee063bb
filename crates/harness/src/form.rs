//! Form synchronization helper
//!
//! The UI under test re-renders form containers: opening an add dialog
//! creates a new subtree while the previous one may linger hidden, so the
//! same field name can match several nodes at once. The helper resolves
//! that ambiguity by taking the last currently-visible match in document
//! order (the most recently rendered one), clears the field in full, writes
//! the value, and dispatches an `input` event; a bare property write is
//! invisible to the reactive framework driving the page.

use tracing::debug;

use crate::driver::PageDriver;
use crate::error::{HarnessError, HarnessResult};

/// Name attribute of the date-of-birth input, the only field whose value
/// is rewritten before the write.
const DOB_FIELD: &str = "dob";

/// Selection policy for ambiguous field matches: visibility filter, then
/// last in document order.
pub fn last_visible<T>(candidates: Vec<(T, bool)>) -> Option<T> {
    candidates
        .into_iter()
        .rev()
        .find(|(_, visible)| *visible)
        .map(|(handle, _)| handle)
}

/// Rewrite a slash-delimited `MM/DD/YYYY` date to the `YYYY-MM-DD` format
/// native date inputs expect. Anything else passes through unchanged.
pub fn normalize_date(value: &str) -> String {
    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [month, day, year] => format!("{year}-{month}-{day}"),
        _ => value.to_string(),
    }
}

fn resolve<D: PageDriver>(driver: &D, selector: &str) -> HarnessResult<D::Handle> {
    let handles = driver.find_all(selector)?;
    if handles.is_empty() {
        return Err(HarnessError::FieldNotFound {
            selector: selector.to_string(),
        });
    }

    let matched = handles.len();
    let mut candidates = Vec::with_capacity(matched);
    for handle in handles {
        let visible = driver.is_visible(&handle)?;
        candidates.push((handle, visible));
    }

    last_visible(candidates).ok_or_else(|| HarnessError::NoVisibleCandidate {
        selector: selector.to_string(),
        matched,
    })
}

/// Clear-and-set the last visible field matching the selector, then notify
/// the page of the change.
pub fn set_field<D: PageDriver>(driver: &mut D, selector: &str, value: &str) -> HarnessResult<()> {
    let handle = resolve(driver, selector)?;

    let value = if driver.attr(&handle, "name")?.as_deref() == Some(DOB_FIELD)
        && value.contains('/')
    {
        normalize_date(value)
    } else {
        value.to_string()
    };

    driver.clear(&handle)?;
    driver.set_value(&handle, &value)?;
    driver.dispatch_input(&handle)?;
    debug!(selector, value = %value, "field set");
    Ok(())
}

/// Read back the trimmed value of the last visible field matching the
/// selector.
pub fn read_field<D: PageDriver>(driver: &D, selector: &str) -> HarnessResult<String> {
    let handle = resolve(driver, selector)?;
    Ok(driver.value_of(&handle)?.trim().to_string())
}

/// Click the last visible element matching the selector, with the same
/// resolution policy as [`set_field`].
pub fn click<D: PageDriver>(driver: &mut D, selector: &str) -> HarnessResult<()> {
    let handle = resolve(driver, selector)?;
    driver.click(&handle)?;
    debug!(selector, "clicked");
    Ok(())
}

/// Text content of every element matching the selector, in document order.
pub fn texts_of<D: PageDriver>(driver: &D, selector: &str) -> HarnessResult<Vec<String>> {
    driver
        .find_all(selector)?
        .iter()
        .map(|h| driver.text_of(h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::driver::WaitState;

    /// Minimal recording page: each field is (selector, name attr, visible,
    /// value), and writes log which operations touched which field.
    struct RecordingPage {
        fields: Vec<(String, String, bool, String)>,
        ops: Vec<(usize, &'static str)>,
    }

    impl RecordingPage {
        fn new(fields: Vec<(&str, &str, bool)>) -> Self {
            Self {
                fields: fields
                    .into_iter()
                    .map(|(sel, name, vis)| {
                        (sel.to_string(), name.to_string(), vis, String::new())
                    })
                    .collect(),
                ops: Vec::new(),
            }
        }
    }

    impl PageDriver for RecordingPage {
        type Handle = usize;

        fn goto(&mut self, _url: &str) -> HarnessResult<()> {
            Ok(())
        }

        fn find_all(&self, selector: &str) -> HarnessResult<Vec<usize>> {
            Ok(self
                .fields
                .iter()
                .enumerate()
                .filter(|(_, f)| f.0 == selector)
                .map(|(i, _)| i)
                .collect())
        }

        fn is_visible(&self, handle: &usize) -> HarnessResult<bool> {
            Ok(self.fields[*handle].2)
        }

        fn attr(&self, handle: &usize, name: &str) -> HarnessResult<Option<String>> {
            Ok((name == "name").then(|| self.fields[*handle].1.clone()))
        }

        fn value_of(&self, handle: &usize) -> HarnessResult<String> {
            Ok(self.fields[*handle].3.clone())
        }

        fn text_of(&self, handle: &usize) -> HarnessResult<String> {
            Ok(self.fields[*handle].3.clone())
        }

        fn clear(&mut self, handle: &usize) -> HarnessResult<()> {
            self.fields[*handle].3.clear();
            self.ops.push((*handle, "clear"));
            Ok(())
        }

        fn set_value(&mut self, handle: &usize, value: &str) -> HarnessResult<()> {
            self.fields[*handle].3 = value.to_string();
            self.ops.push((*handle, "set"));
            Ok(())
        }

        fn dispatch_input(&mut self, handle: &usize) -> HarnessResult<()> {
            self.ops.push((*handle, "input"));
            Ok(())
        }

        fn click(&mut self, _handle: &usize) -> HarnessResult<()> {
            Ok(())
        }

        fn wait_for(
            &mut self,
            _selector: &str,
            _state: WaitState,
            _timeout: Duration,
        ) -> HarnessResult<()> {
            Ok(())
        }

        fn quit(&mut self) -> HarnessResult<()> {
            Ok(())
        }
    }

    #[test]
    fn last_visible_skips_hidden_trailing_nodes() {
        let candidates = vec![("a", true), ("b", true), ("c", false)];
        assert_eq!(last_visible(candidates), Some("b"));
    }

    #[test]
    fn last_visible_none_when_all_hidden() {
        let candidates = vec![("a", false), ("b", false)];
        assert_eq!(last_visible::<&str>(candidates), None);
    }

    #[test]
    fn only_the_last_visible_match_receives_the_value() {
        // Two stale hidden dialogs and one live one share the field name.
        let mut page = RecordingPage::new(vec![
            ("input[name='full_name']", "full_name", false),
            ("input[name='full_name']", "full_name", false),
            ("input[name='full_name']", "full_name", true),
        ]);
        set_field(&mut page, "input[name='full_name']", "Nguyen Van An").unwrap();
        assert_eq!(page.fields[2].3, "Nguyen Van An");
        assert!(page.fields[0].3.is_empty());
        assert!(page.fields[1].3.is_empty());
    }

    #[test]
    fn write_is_clear_set_then_input_event() {
        let mut page = RecordingPage::new(vec![("input[name='email']", "email", true)]);
        set_field(&mut page, "input[name='email']", "an.sv1@gmail.com").unwrap();
        assert_eq!(page.ops, vec![(0, "clear"), (0, "set"), (0, "input")]);
    }

    #[test]
    fn dob_field_gets_the_date_transform() {
        let mut page = RecordingPage::new(vec![("input[name='dob']", "dob", true)]);
        set_field(&mut page, "input[name='dob']", "03/14/2003").unwrap();
        assert_eq!(page.fields[0].3, "2003-03-14");
    }

    #[test]
    fn non_dob_field_keeps_slashes() {
        let mut page = RecordingPage::new(vec![("input[name='address']", "address", true)]);
        set_field(&mut page, "input[name='address']", "12/3 Le Loi").unwrap();
        assert_eq!(page.fields[0].3, "12/3 Le Loi");
    }

    #[test]
    fn missing_field_is_field_not_found() {
        let mut page = RecordingPage::new(vec![]);
        let err = set_field(&mut page, "input[name='phone']", "0911234567").unwrap_err();
        assert!(matches!(err, HarnessError::FieldNotFound { .. }));
    }

    #[test]
    fn all_hidden_is_no_visible_candidate() {
        let mut page = RecordingPage::new(vec![("input[name='phone']", "phone", false)]);
        let err = set_field(&mut page, "input[name='phone']", "0911234567").unwrap_err();
        assert!(matches!(
            err,
            HarnessError::NoVisibleCandidate { matched: 1, .. }
        ));
    }

    #[test]
    fn read_field_returns_the_last_visible_value_trimmed() {
        let mut page = RecordingPage::new(vec![
            ("input[name='address']", "address", false),
            ("input[name='address']", "address", true),
        ]);
        page.fields[0].3 = "stale".to_string();
        page.fields[1].3 = "  12 Le Loi, Quan 1, TP.HCM  ".to_string();
        assert_eq!(
            read_field(&page, "input[name='address']").unwrap(),
            "12 Le Loi, Quan 1, TP.HCM"
        );
    }

    #[test]
    fn read_field_uses_the_same_resolution_policy() {
        let page = RecordingPage::new(vec![]);
        assert!(matches!(
            read_field(&page, "input[name='email']").unwrap_err(),
            HarnessError::FieldNotFound { .. }
        ));

        let page = RecordingPage::new(vec![("input[name='email']", "email", false)]);
        assert!(matches!(
            read_field(&page, "input[name='email']").unwrap_err(),
            HarnessError::NoVisibleCandidate { .. }
        ));
    }

    #[test]
    fn normalize_date_passes_through_other_shapes() {
        assert_eq!(normalize_date("2003-03-14"), "2003-03-14");
        assert_eq!(normalize_date("14/03"), "14/03");
        assert_eq!(normalize_date("03/14/2003"), "2003-03-14");
    }
}
