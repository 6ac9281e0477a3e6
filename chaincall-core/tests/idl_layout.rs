//! IDL parsing and mapping of instruction args onto codec layouts.

use chaincall_core::config::UnknownTypePolicy;
use chaincall_core::discriminator::instruction_discriminator;
use chaincall_core::error::CodecError;
use chaincall_core::idl::{IdlAccountItem, ProgramIdl};
use chaincall_core::types::{FieldSpec, PrimitiveType};

const BLOG_IDL: &str = r#"{
  "version": "0.1.0",
  "name": "blog",
  "instructions": [
    {
      "name": "createPost",
      "accounts": [
        { "name": "post", "isMut": true, "isSigner": false },
        { "name": "author", "isMut": true, "isSigner": true },
        { "name": "systemProgram", "isMut": false, "isSigner": false }
      ],
      "args": [
        { "name": "title", "type": "string" },
        { "name": "tag", "type": "u8" }
      ]
    },
    {
      "name": "tip",
      "discriminator": [1, 2, 3, 4, 5, 6, 7, 8],
      "accounts": [],
      "args": [
        { "name": "to", "type": "publicKey" },
        { "name": "meta", "type": { "defined": "TipMeta" } },
        { "name": "hashes", "type": { "vec": { "array": ["u8", 32] } } }
      ]
    }
  ]
}"#;

#[test]
fn test_anchor_account_flags_deserialize() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    assert!(ix.accounts[1].writable);
    assert!(ix.accounts[1].signer);
    assert!(!ix.accounts[2].writable);
}

#[test]
fn test_new_style_account_flags_deserialize() {
    let json = r#"{"name":"state","writable":true,"signer":false}"#;
    let acc: IdlAccountItem = serde_json::from_str(json).unwrap();
    assert!(acc.writable);
    assert!(!acc.optional);
}

#[test]
fn test_optional_false_is_omitted() {
    let acc = IdlAccountItem {
        name: "state".to_string(),
        writable: true,
        signer: false,
        optional: false,
    };
    let json = serde_json::to_string(&acc).unwrap();
    assert!(!json.contains("optional"), "JSON: {}", json);
}

#[test]
fn test_field_specs_follow_declared_order() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let specs = idl
        .instruction("createPost")
        .unwrap()
        .field_specs(UnknownTypePolicy::Reject)
        .unwrap();
    assert_eq!(
        specs,
        vec![
            FieldSpec::new("title", PrimitiveType::StringUtf8),
            FieldSpec::new("tag", PrimitiveType::U8),
        ]
    );
}

#[test]
fn test_composite_types_fall_back_to_string() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let specs = idl
        .instruction("tip")
        .unwrap()
        .field_specs(UnknownTypePolicy::FallbackToString)
        .unwrap();
    let types: Vec<PrimitiveType> = specs.iter().map(|s| s.ty).collect();
    assert_eq!(
        types,
        vec![
            PrimitiveType::PublicKey,
            PrimitiveType::StringUtf8,
            PrimitiveType::StringUtf8
        ]
    );
}

#[test]
fn test_composite_types_rejected_when_configured() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let err = idl
        .instruction("tip")
        .unwrap()
        .field_specs(UnknownTypePolicy::Reject)
        .unwrap_err();
    match err {
        CodecError::UnknownType { field, type_name } => {
            assert_eq!(field, "meta");
            assert_eq!(type_name, "TipMeta");
        }
        other => panic!("Expected UnknownType, got {:?}", other),
    }
}

#[test]
fn test_discriminator_prefers_idl_value() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    assert_eq!(
        idl.instruction("tip").unwrap().discriminator().unwrap(),
        [1, 2, 3, 4, 5, 6, 7, 8]
    );
    assert_eq!(
        idl.instruction("createPost").unwrap().discriminator().unwrap(),
        instruction_discriminator("createPost")
    );
}

#[test]
fn test_bad_idl_discriminator_length() {
    let json = r#"{"name":"p","instructions":[{"name":"x","discriminator":[1,2]}]}"#;
    let idl = ProgramIdl::from_json(json).unwrap();
    let err = idl.instructions[0].discriminator().unwrap_err();
    assert_eq!(err, CodecError::InvalidDiscriminator { len: 2 });
}

#[test]
fn test_unknown_instruction_is_none() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    assert!(idl.instruction("deletePost").is_none());
}

#[test]
fn test_bytes_arg_maps_to_unprefixed_raw_bytes() {
    let json = r#"{"name":"p","instructions":[{"name":"store","args":[{"name":"blob","type":"bytes"}]}]}"#;
    let idl = ProgramIdl::from_json(json).unwrap();
    let specs = idl.instructions[0]
        .field_specs(UnknownTypePolicy::Reject)
        .unwrap();
    assert_eq!(specs, vec![FieldSpec::new("blob", PrimitiveType::RawBytes)]);
    assert_eq!(PrimitiveType::RawBytes.fixed_size(), None);
}

#[test]
fn test_pretty_json_round_trips() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let json = idl.to_json_pretty().unwrap();
    assert!(json.contains("\n  \"instructions\""), "JSON: {}", json);

    let back = ProgramIdl::from_json(&json).unwrap();
    assert_eq!(back.name, "blog");
    assert_eq!(back.instructions.len(), 2);
    let tip = back.instruction("tip").unwrap();
    assert_eq!(tip.discriminator().unwrap(), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(tip.args[1].type_.display_name(), "TipMeta");
    assert!(back.instruction("createPost").unwrap().accounts[1].signer);
}
