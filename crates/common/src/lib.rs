pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_type_ok() {
        let m = types::Message { msg: "done".into() };
        assert_eq!(m.msg, "done");
    }
}
