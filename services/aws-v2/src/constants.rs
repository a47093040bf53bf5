// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Headers used in signing.
pub const X_AMZ_PREFIX: &str = "x-amz-";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const CONTENT_MD5: &str = "content-md5";

// Env values used in config.
pub const RGW_ACCESS_KEY_ID: &str = "RGW_ACCESS_KEY_ID";
pub const RGW_SECRET_ACCESS_KEY: &str = "RGW_SECRET_ACCESS_KEY";
pub const RGW_SIGN_SUB_RESOURCE_MATCH: &str = "RGW_SIGN_SUB_RESOURCE_MATCH";
pub const RGW_SIGN_STRICT: &str = "RGW_SIGN_STRICT";

/// Query parameters that select a sub-resource and so take part in the
/// canonicalized resource.
///
/// Please attention: the sub-resources are case sensitive and the order is
/// part of the wire contract with the server.
///
/// - [Constructing the CanonicalizedResource element](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html#ConstructingTheCanonicalizedResourceElement)
pub const SUB_RESOURCES: &[&str] = &[
    "acl",
    "cors",
    "delete",
    "encryption",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "policyStatus",
    "publicAccessBlock",
    "requestPayment",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "tagging",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
    "object-lock",
];

pub fn is_sub_resource(param: &str) -> bool {
    SUB_RESOURCES.contains(&param)
}
