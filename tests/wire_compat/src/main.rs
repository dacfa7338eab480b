fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use shipstash_protocol::{
        ArtifactRecord, PartTicketRequest, PartTransferTicket, UploadMetadata, UploadPlan,
        VerifyRequest,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent comparison).
    ///
    /// Only fixtures in canonical wire shape can round-trip: no `null`
    /// placeholders for absent optionals, no unknown fields.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  rust:    {reserialized}"
        );
    }

    // --- Request bodies ---

    #[test]
    fn fixture_upload_metadata() {
        roundtrip_test::<UploadMetadata>("upload_metadata.json");
    }

    #[test]
    fn fixture_part_ticket_request() {
        roundtrip_test::<PartTicketRequest>("part_ticket_request.json");
    }

    #[test]
    fn fixture_verify_request() {
        roundtrip_test::<VerifyRequest>("verify_request.json");
    }

    // --- Response bodies ---

    #[test]
    fn fixture_upload_plan_direct() {
        roundtrip_test::<UploadPlan>("upload_plan_direct.json");

        let plan: UploadPlan =
            serde_json::from_value(load_fixture("upload_plan_direct.json")).unwrap();
        assert!(!plan.primary_file.chunked);
        assert!(plan.expansion_files.is_empty());

        let data = plan.primary_file.presigned_data.unwrap();
        assert_eq!(
            data.header("Content-Type").as_deref(),
            Some("application/vnd.android.package-archive")
        );
        // Array-valued headers flatten to their first element.
        assert_eq!(data.header("x-amz-acl").as_deref(), Some("private"));
    }

    #[test]
    fn fixture_upload_plan_chunked() {
        roundtrip_test::<UploadPlan>("upload_plan_chunked.json");

        let plan: UploadPlan =
            serde_json::from_value(load_fixture("upload_plan_chunked.json")).unwrap();
        assert!(plan.primary_file.chunked);
        assert_eq!(plan.primary_file.part_size_bytes(), 25 * 1024 * 1024);
        assert_eq!(plan.primary_file.chunked_number_parts, 6);
        assert_eq!(plan.expansion_files.len(), 1);
        assert_eq!(plan.expansion_files[0].chunked_number_parts, 2);
    }

    /// The ticket fixture carries extra backend fields on purpose; a
    /// backend that adds per-part tokens must not break parsing.
    #[test]
    fn fixture_part_transfer_ticket_tolerates_unknown_fields() {
        let ticket: PartTransferTicket =
            serde_json::from_value(load_fixture("part_transfer_ticket.json")).unwrap();
        assert_eq!(
            ticket.part_presigned_url,
            "https://storage.example.com/bucket/pu_9b3d4e/part-3?X-Amz-Signature=def"
        );
    }

    #[test]
    fn fixture_artifact_record() {
        roundtrip_test::<ArtifactRecord>("artifact_record.json");

        let record: ArtifactRecord =
            serde_json::from_value(load_fixture("artifact_record.json")).unwrap();
        assert_eq!(record.build_id.as_deref(), Some("bld_4412"));
        assert!(record.pending_processing);
        assert_eq!(record.platform_short_name(), Some("android"));
    }
}
