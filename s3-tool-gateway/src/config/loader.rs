/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::{Builder, Config};
use crate::error::{self, Error};

const MAX_FILE_SIZE_MB_CEILING: u64 = 5000;
const MAX_LIST_OBJECTS_CEILING: i32 = 10_000;

/// Load gateway [`Config`] from the process environment.
///
/// Environment variables read: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
/// `AWS_REGION`, `S3_ENDPOINT_URL`, `S3_BUCKET_NAME`, `MAX_FILE_SIZE_MB`,
/// `MAX_LIST_OBJECTS`, and `ALLOWED_EXTENSIONS` (comma-separated). Values
/// set explicitly on the loader win over the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    bucket: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    max_file_size_mb: Option<u64>,
    max_list_objects: Option<i32>,
    allowed_extensions: Option<String>,
}

impl ConfigLoader {
    /// Override the default bucket.
    pub fn bucket(mut self, value: impl Into<String>) -> Self {
        self.bucket = Some(value.into());
        self
    }

    /// Override the region.
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = Some(value.into());
        self
    }

    /// Override the endpoint URL.
    pub fn endpoint_url(mut self, value: impl Into<String>) -> Self {
        self.endpoint_url = Some(value.into());
        self
    }

    /// Override the access key ID.
    pub fn access_key_id(mut self, value: impl Into<String>) -> Self {
        self.access_key_id = Some(value.into());
        self
    }

    /// Override the secret access key.
    pub fn secret_access_key(mut self, value: impl Into<String>) -> Self {
        self.secret_access_key = Some(value.into());
        self
    }

    /// Override the upload size ceiling, in mebibytes.
    pub fn max_file_size_mb(mut self, mebibytes: u64) -> Self {
        self.max_file_size_mb = Some(mebibytes);
        self
    }

    /// Override the list size ceiling.
    pub fn max_list_objects(mut self, count: i32) -> Self {
        self.max_list_objects = Some(count);
        self
    }

    /// Override the comma-separated extension allowlist.
    pub fn allowed_extensions(mut self, csv: impl Into<String>) -> Self {
        self.allowed_extensions = Some(csv.into());
        self
    }

    /// Resolve the configuration.
    ///
    /// Explicit loader overrides win over environment values; the resulting
    /// builder performs the required-field check.
    pub fn load(self) -> Result<Config, Error> {
        let mut builder = Builder::default();

        if let Some(value) = self.access_key_id.or_else(|| env_opt("AWS_ACCESS_KEY_ID")) {
            builder = builder.access_key_id(value);
        }
        if let Some(value) = self
            .secret_access_key
            .or_else(|| env_opt("AWS_SECRET_ACCESS_KEY"))
        {
            builder = builder.secret_access_key(value);
        }
        if let Some(value) = self.region.or_else(|| env_opt("AWS_REGION")) {
            builder = builder.region(value);
        }
        if let Some(value) = self.endpoint_url.or_else(|| env_opt("S3_ENDPOINT_URL")) {
            builder = builder.endpoint_url(value);
        }
        if let Some(value) = self.bucket.or_else(|| env_opt("S3_BUCKET_NAME")) {
            builder = builder.bucket(value);
        }

        let max_file_size_mb = match self.max_file_size_mb {
            Some(value) => Some(value),
            None => env_opt("MAX_FILE_SIZE_MB")
                .map(|raw| parse_bounded(&raw, "MAX_FILE_SIZE_MB", 1, MAX_FILE_SIZE_MB_CEILING))
                .transpose()?,
        };
        if let Some(value) = max_file_size_mb {
            if !(1..=MAX_FILE_SIZE_MB_CEILING).contains(&value) {
                return Err(out_of_range("MAX_FILE_SIZE_MB", 1, MAX_FILE_SIZE_MB_CEILING));
            }
            builder = builder.max_file_size_mb(value);
        }

        let max_list_objects = match self.max_list_objects {
            Some(value) => Some(value),
            None => env_opt("MAX_LIST_OBJECTS")
                .map(|raw| {
                    parse_bounded(&raw, "MAX_LIST_OBJECTS", 1, MAX_LIST_OBJECTS_CEILING as u64)
                        .map(|v| v as i32)
                })
                .transpose()?,
        };
        if let Some(value) = max_list_objects {
            if !(1..=MAX_LIST_OBJECTS_CEILING).contains(&value) {
                return Err(out_of_range(
                    "MAX_LIST_OBJECTS",
                    1,
                    MAX_LIST_OBJECTS_CEILING as u64,
                ));
            }
            builder = builder.max_list_objects(value);
        }

        if let Some(csv) = self
            .allowed_extensions
            .or_else(|| env_opt("ALLOWED_EXTENSIONS"))
        {
            builder = builder.allowed_extensions(&csv);
        }

        builder.build()
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_bounded(raw: &str, name: &str, min: u64, max: u64) -> Result<u64, Error> {
    let value: u64 = raw
        .parse()
        .map_err(|_| error::invalid_config(format!("{name} must be an integer, got '{raw}'")))?;
    if !(min..=max).contains(&value) {
        return Err(out_of_range(name, min, max));
    }
    Ok(value)
}

fn out_of_range(name: &str, min: u64, max: u64) -> Error {
    error::invalid_config(format!("{name} must be between {min} and {max}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // Only loader-level overrides are exercised here; reading real process
    // environment variables in unit tests races with parallel test threads.

    #[test]
    fn test_overrides_resolve_without_env() {
        let config = ConfigLoader::default()
            .access_key_id("AKIA-TEST")
            .secret_access_key("secret")
            .bucket("test-bucket")
            .region("eu-west-1")
            .endpoint_url("http://localhost:9000")
            .max_file_size_mb(5)
            .max_list_objects(50)
            .allowed_extensions("txt,md")
            .load()
            .unwrap();

        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.endpoint_url(), Some("http://localhost:9000"));
        assert_eq!(config.max_file_size_bytes(), 5 * crate::MEBIBYTE);
        assert_eq!(config.max_list_objects(), 50);
        assert_eq!(
            config.allowed_extensions(),
            Some(&["txt".to_owned(), "md".to_owned()][..])
        );
    }

    #[test]
    fn test_out_of_range_overrides_rejected() {
        let err = ConfigLoader::default()
            .access_key_id("k")
            .secret_access_key("s")
            .bucket("test-bucket")
            .max_file_size_mb(0)
            .load()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Config);

        let err = ConfigLoader::default()
            .access_key_id("k")
            .secret_access_key("s")
            .bucket("test-bucket")
            .max_list_objects(20_000)
            .load()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Config);
    }

    #[test]
    fn test_parse_bounded() {
        assert_eq!(parse_bounded("100", "X", 1, 5000).unwrap(), 100);
        assert!(parse_bounded("abc", "X", 1, 5000).is_err());
        assert!(parse_bounded("0", "X", 1, 5000).is_err());
        assert!(parse_bounded("5001", "X", 1, 5000).is_err());
    }
}
