/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */


use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::primitives::DateTime;
use aws_sdk_s3::types::{Object, ObjectStorageClass};
use aws_smithy_mocks::{mock, mock_client, RuleMode};
use s3_tool_gateway::error::ErrorKind;
use test_utils::{test_client, test_client_with};

fn s3_object(key: &str, size: i64) -> Object {
    Object::builder()
        .key(key)
        .size(size)
        .e_tag("\"etag\"")
        .last_modified(DateTime::from_secs(1_700_000_000))
        .storage_class(ObjectStorageClass::Standard)
        .build()
}

#[tokio::test]
async fn test_list_with_prefix() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2)
        // the gateway normalizes the prefix before it reaches the wire
        .match_requests(|input| input.prefix() == Some("docs"))
        .then_output(|| {
            ListObjectsV2Output::builder()
                .set_contents(Some(vec![s3_object("docs/a", 5), s3_object("docs/b", 7)]))
                .is_truncated(false)
                .build()
        });
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list]));

    let out = gateway.list().prefix("docs/").send().await.unwrap();

    assert_eq!(out.total_count, 2);
    assert_eq!(out.total_size_bytes, 12);
    assert_eq!(out.prefix, "docs");
    let keys: Vec<_> = out.files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, ["docs/a", "docs/b"]);
    assert_eq!(out.files[0].storage_class, "STANDARD");
    assert_eq!(out.files[0].etag, "etag");
}

#[tokio::test]
async fn test_list_clamps_to_requested_max_keys() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
        let contents = (0..10)
            .map(|i| s3_object(&format!("k{i:02}"), 1))
            .collect::<Vec<_>>();
        ListObjectsV2Output::builder()
            .set_contents(Some(contents))
            .is_truncated(false)
            .build()
    });
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list]));

    let out = gateway.list().max_keys(5).send().await.unwrap();

    assert_eq!(out.total_count, 5);
    assert_eq!(out.files.len(), 5);
    assert_eq!(out.total_size_bytes, 5);
}

#[tokio::test]
async fn test_list_clamps_to_configured_ceiling() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
        let contents = (0..10)
            .map(|i| s3_object(&format!("k{i:02}"), 1))
            .collect::<Vec<_>>();
        ListObjectsV2Output::builder()
            .set_contents(Some(contents))
            .is_truncated(false)
            .build()
    });
    let gateway = test_client_with(
        mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list]),
        |builder| builder.max_list_objects(3),
    );

    // requesting more than the ceiling still clamps down
    let out = gateway.list().max_keys(100).send().await.unwrap();

    assert_eq!(out.total_count, 3);
}

#[tokio::test]
async fn test_list_paginates_until_exhausted() {
    let page1 = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|input| input.continuation_token().is_none())
        .then_output(|| {
            ListObjectsV2Output::builder()
                .set_contents(Some(vec![s3_object("a", 1), s3_object("b", 2)]))
                .is_truncated(true)
                .next_continuation_token("token-1")
                .build()
        });
    let page2 = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|input| input.continuation_token() == Some("token-1"))
        .then_output(|| {
            ListObjectsV2Output::builder()
                .set_contents(Some(vec![s3_object("c", 3)]))
                .is_truncated(false)
                .build()
        });
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&page1, &page2]));

    let out = gateway.list().send().await.unwrap();

    assert_eq!(out.total_count, 3);
    assert_eq!(out.total_size_bytes, 6);
    let keys: Vec<_> = out.files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_list_empty_bucket() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2)
        .then_output(|| ListObjectsV2Output::builder().is_truncated(false).build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list]));

    let out = gateway.list().send().await.unwrap();

    assert_eq!(out.total_count, 0);
    assert_eq!(out.total_size_bytes, 0);
    assert!(out.files.is_empty());
}

#[tokio::test]
async fn test_list_traversal_prefix_rejected() {
    let list = mock!(aws_sdk_s3::Client::list_objects_v2)
        .then_output(|| ListObjectsV2Output::builder().build());
    let gateway = test_client(mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&list]));

    let err = gateway.list().prefix("../secrets/").send().await.unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Validation);
}
