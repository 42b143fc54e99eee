// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Service facades grouping the platform interfaces by business area
//!
//! Each facade borrows a [`Client`](crate::Client) and maps its methods onto
//! [`Client::call`](crate::Client::call) with the matching transaction code.

mod file;
mod member;
mod merchant;
mod order;
mod query;

pub use file::{FileService, FileType, UploadItem, UploadOutcome};
pub use member::MemberService;
pub use merchant::MerchantService;
pub use order::OrderService;
pub use query::{DEFAULT_PAGE_SIZE, DetailQuery, QueryService};
