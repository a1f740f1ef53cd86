// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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


//! Emitter module tests
//!
//! Contains test suites for:
//! - Native listener registry reference counting
//! - Emission routing and event family adapters
//! - The `WidgetEvents` subscribe/unsubscribe/emit surface

#[cfg(test)]
mod registry_tests;
