//! Request assembly from IDL-derived CLI flags.

use std::collections::HashMap;

use chaincall_cli::cli::parse_instruction_args;
use chaincall_cli::layout::{pack, unpack};
use chaincall_cli::tx::{build_request, InstructionRequest};
use chaincall_core::codec::InstructionCodec;
use chaincall_core::config::CodecConfig;
use chaincall_core::discriminator::instruction_discriminator;
use chaincall_core::hex::to_hex;
use chaincall_core::idl::ProgramIdl;

const PROGRAM_ID: &str = "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS";
const AUTHOR: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
const POST: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const SYSTEM: &str = "11111111111111111111111111111111";

const BLOG_IDL: &str = r#"{
  "version": "0.1.0",
  "name": "blog",
  "instructions": [
    {
      "name": "createPost",
      "accounts": [
        { "name": "post", "isMut": true, "isSigner": false },
        { "name": "author", "isMut": true, "isSigner": true },
        { "name": "systemProgram", "isMut": false, "isSigner": false },
        { "name": "referrer", "isMut": false, "isSigner": false, "optional": true }
      ],
      "args": [
        { "name": "title", "type": "string" },
        { "name": "tag", "type": "u8" }
      ]
    }
  ]
}"#;

fn flags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn full_flags() -> HashMap<String, String> {
    flags(&[
        ("title", "Hello"),
        ("tag", "3"),
        ("post-account", POST),
        ("author-account", AUTHOR),
        ("system-program-account", SYSTEM),
    ])
}

#[test]
fn test_create_post_request() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let built = build_request(&InstructionCodec::default(), ix, &full_flags(), PROGRAM_ID, Some(AUTHOR)).unwrap();

    let expected_data = format!(
        "{}0500000048656c6c6f03",
        to_hex(&instruction_discriminator("createPost"))
    );
    assert_eq!(built.request.instruction_data, expected_data);
    assert_eq!(built.request.fee_payer.as_deref(), Some(AUTHOR));

    let accounts = &built.request.accounts;
    assert_eq!(accounts.len(), 4);
    assert_eq!(accounts[0].pubkey, POST);
    assert!(accounts[0].is_writable && !accounts[0].is_signer);
    assert!(accounts[1].is_writable && accounts[1].is_signer);
    // missing optional account is filled with the program id
    assert_eq!(accounts[3].pubkey, PROGRAM_ID);
    assert!(!accounts[3].is_writable && !accounts[3].is_signer);
}

#[test]
fn test_request_json_shape() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let built = build_request(&InstructionCodec::default(), ix, &full_flags(), PROGRAM_ID, None).unwrap();

    let json = serde_json::to_value(&built.request).unwrap();
    assert_eq!(json["program_id"], PROGRAM_ID);
    assert_eq!(json["accounts"][1]["is_signer"], true);
    assert!(json.get("fee_payer").is_none());

    let back: InstructionRequest = serde_json::from_value(json).unwrap();
    assert_eq!(back, built.request);
}

#[test]
fn test_missing_flags_are_all_reported() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let err = build_request(
        &InstructionCodec::default(),
        ix,
        &flags(&[("title", "Hello")]),
        PROGRAM_ID,
        None,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("--tag"), "{}", msg);
    assert!(msg.contains("--post-account"), "{}", msg);
    assert!(msg.contains("--system-program-account"), "{}", msg);
    assert!(!msg.contains("--referrer-account"), "{}", msg);
}

#[test]
fn test_bad_account_key_is_rejected() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let mut args = full_flags();
    args.insert("post-account".into(), "not-a-key".into());
    let err = build_request(&InstructionCodec::default(), ix, &args, PROGRAM_ID, None).unwrap_err();
    assert!(err.to_string().contains("--post-account"), "{}", err);
}

#[test]
fn test_overflowing_arg_fails_whole_request() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let mut args = full_flags();
    args.insert("tag".into(), "256".into());
    let err = build_request(&InstructionCodec::default(), ix, &args, PROGRAM_ID, None).unwrap_err();
    assert!(format!("{:#}", err).contains("does not fit in u8"), "{:#}", err);
}

#[test]
fn test_capacity_limit_applies_to_request() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let codec = InstructionCodec::new(CodecConfig::default().with_max_payload_len(10));
    assert!(build_request(&codec, ix, &full_flags(), PROGRAM_ID, None).is_err());
}

#[test]
fn test_arg_and_account_sharing_a_flag_is_rejected() {
    let json = r#"{
      "name": "blog",
      "instructions": [{
        "name": "linkPost",
        "accounts": [{ "name": "post", "isMut": true, "isSigner": false }],
        "args": [
          { "name": "postAccount", "type": "publicKey" },
          { "name": "text", "type": "string" }
        ]
      }]
    }"#;
    let idl = ProgramIdl::from_json(json).unwrap();
    let ix = idl.instruction("linkPost").unwrap();
    let args = flags(&[("post-account", POST), ("text", "hi")]);
    let err = build_request(&InstructionCodec::default(), ix, &args, PROGRAM_ID, None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("ambiguous"), "{}", msg);
    assert!(msg.contains("--post-account (arg 'postAccount' and account 'post')"), "{}", msg);
}

#[test]
fn test_valueless_string_flag_never_reaches_payload() {
    let idl = ProgramIdl::from_json(BLOG_IDL).unwrap();
    let ix = idl.instruction("createPost").unwrap();
    let raw: Vec<String> = ["--title", "--tag", "3", "--post-account", POST]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let err = parse_instruction_args(ix, &raw).unwrap_err();
    assert!(err.to_string().contains("--title"), "{}", err);

    let raw: Vec<String> = [
        "--title=--draft",
        "--tag",
        "3",
        "--post-account",
        POST,
        "--author-account",
        AUTHOR,
        "--system-program-account",
        SYSTEM,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let args = parse_instruction_args(ix, &raw).unwrap();
    let built = build_request(&InstructionCodec::default(), ix, &args, PROGRAM_ID, None).unwrap();
    // "--draft" is 7 bytes, length-prefixed
    assert!(built.request.instruction_data.ends_with("070000002d2d647261667403"));
}

#[test]
fn test_pack_layout() {
    let codec = InstructionCodec::default();
    let response = pack(&codec, &["u8=1".to_string(), "title:string=Hi".to_string()]).unwrap();
    assert_eq!(response.buffer_hex, "01020000004869");
    assert_eq!(response.buffer_base64, "AQIAAABIaQ==");
    assert_eq!(response.length, 7);
}

#[test]
fn test_pack_rejects_malformed_item() {
    let codec = InstructionCodec::default();
    assert!(pack(&codec, &["u8".to_string()]).is_err());
}

#[test]
fn test_unpack_layout() {
    let codec = InstructionCodec::default();
    let fields = unpack(&codec, "01020000004869", &["u8".to_string(), "title:string".to_string()]).unwrap();
    assert_eq!(fields[0].name, "field0");
    assert_eq!(fields[0].value, "1");
    assert_eq!(fields[1].name, "title");
    assert_eq!(fields[1].type_, "string");
    assert_eq!(fields[1].value, "\"Hi\"");
}
