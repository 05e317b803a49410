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

//! Domain types shared across the rate proxy: [`Currency`](currency::Currency),
//! [`Pair`](pair::Pair), and [`Rate`](rate::Rate).

pub mod currency;
pub mod pair;
pub mod rate;

pub use currency::{
    tracked_currencies, Currency, CurrencyError, BASE_CURRENCY, CURRENCY_WHITELIST,
    TRACKED_CURRENCIES,
};
pub use pair::Pair;
pub use rate::Rate;
