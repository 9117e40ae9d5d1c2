/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */

mod horizontal_u8;
mod vertical_u8;

pub(crate) use horizontal_u8::*;
pub(crate) use vertical_u8::*;
