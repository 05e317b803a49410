// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The in-process serving half of the rate proxy: snapshot cache, cross-rate
//! derivation, the service facade, and the refresh orchestration.

pub mod derive;
pub mod facade;
pub mod refresher;
pub mod snapshot;

pub use derive::{get_rate, ServiceError};
pub use facade::{FacadeError, RateServiceFacade};
pub use refresher::refresh;
pub use snapshot::{run_sync_job, SnapshotCache};
