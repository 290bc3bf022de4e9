/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */


use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::types::error::NotFound;
use aws_smithy_mocks::{mock, mock_client, RuleMode};
use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use s3_tool_gateway::error::ErrorKind;
use test_utils::{test_client, test_client_with};

#[tokio::test]
async fn test_upload_new_object() {
    let (_guard, _rx) = capture_test_logs();
    let head = mock!(aws_sdk_s3::Client::head_object)
        .then_error(|| HeadObjectError::NotFound(NotFound::builder().build()));
    let put = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|input| {
            input.key() == Some("docs/report.txt") && input.bucket() == Some("test-bucket")
        })
        .then_output(|| PutObjectOutput::builder().e_tag("\"etag\"").build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head, &put]));

    let out = gateway
        .upload()
        .key("docs/report.txt")
        .content("hello world")
        .content_type("text/plain")
        .send()
        .await
        .unwrap();

    assert_eq!(out.key, "docs/report.txt");
    assert_eq!(out.bucket, "test-bucket");
    assert_eq!(out.size_bytes, 11);
    assert_eq!(out.content_type, "text/plain");
}

#[tokio::test]
async fn test_upload_existing_object_conflicts() {
    let head = mock!(aws_sdk_s3::Client::head_object)
        .then_output(|| HeadObjectOutput::builder().content_length(11).build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&head]));

    let err = gateway
        .upload()
        .key("docs/report.txt")
        .content("hello world")
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Conflict);
}

#[tokio::test]
async fn test_upload_with_overwrite_skips_probe() {
    // no head_object rule registered: an existence probe would fail the test
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let out = gateway
        .upload()
        .key("docs/report.txt")
        .content("replacement")
        .overwrite(true)
        .send()
        .await
        .unwrap();

    assert_eq!(out.size_bytes, "replacement".len() as u64);
}

#[tokio::test]
async fn test_upload_base64_content_is_decoded() {
    let payload: &[u8] = &[0xde, 0xad, 0xbe, 0xef];
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let out = gateway
        .upload()
        .key("blobs/blob.bin")
        .content(BASE64.encode(payload))
        .is_base64(true)
        .overwrite(true)
        .send()
        .await
        .unwrap();

    assert_eq!(out.size_bytes, payload.len() as u64);
}

#[tokio::test]
async fn test_upload_malformed_base64_fails_validation() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let err = gateway
        .upload()
        .key("blobs/blob.bin")
        .content("this is !!! not base64")
        .is_base64(true)
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Validation);
}

#[tokio::test]
async fn test_upload_traversal_key_rejected_before_any_call() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let err = gateway
        .upload()
        .key("docs/../../etc/passwd")
        .content("x")
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Validation);
}

#[tokio::test]
async fn test_upload_extension_allowlist_enforced() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client_with(
        mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]),
        |builder| builder.allowed_extensions("txt,md"),
    );

    let err = gateway
        .upload()
        .key("payload.exe")
        .content("x")
        .overwrite(true)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Validation);

    // an allowlisted extension goes through
    gateway
        .upload()
        .key("notes.txt")
        .content("x")
        .overwrite(true)
        .send()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_size_ceiling_enforced() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client_with(
        mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]),
        |builder| builder.max_file_size_mb(1),
    );

    let err = gateway
        .upload()
        .key("big.bin")
        .content(vec![b'a'; 1024 * 1024 + 1])
        .overwrite(true)
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Validation);
}

#[tokio::test]
async fn test_upload_normalized_key_reaches_the_wire() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|input| input.key() == Some("docs/report.txt"))
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let out = gateway
        .upload()
        .key("docs//./report.txt")
        .content("x")
        .overwrite(true)
        .send()
        .await
        .unwrap();

    assert_eq!(out.key, "docs/report.txt");
}

#[tokio::test]
async fn test_upload_explicit_bucket_is_validated() {
    let put = mock!(aws_sdk_s3::Client::put_object)
        .then_output(|| PutObjectOutput::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&put]));

    let err = gateway
        .upload()
        .key("docs/report.txt")
        .content("x")
        .bucket("My--Bucket")
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Validation);
}
