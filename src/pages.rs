/*
 * Copyright (C) 2025  Chianti GALLY
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use crate::error::ConvertError;

/// Which pages of each document get converted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PageSelection {
    #[default]
    All,
    /// 1-based page number, as typed by the user.
    Single(usize),
}

impl PageSelection {
    /// `0` means every page.
    pub fn from_requested(requested: usize) -> Self {
        match requested {
            0 => PageSelection::All,
            page => PageSelection::Single(page),
        }
    }

    pub fn requested(self) -> usize {
        match self {
            PageSelection::All => 0,
            PageSelection::Single(page) => page,
        }
    }

    /// Zero-based indices to render from a document of `total` pages.
    pub fn indices(self, total: usize) -> Vec<usize> {
        select_pages(self.requested(), total)
    }

    /// The error to report when the requested page is past the end.
    pub fn missing_in(self, total: usize) -> Option<ConvertError> {
        match self {
            PageSelection::Single(page) if page > total => {
                Some(ConvertError::MissingPage { page, total })
            }
            _ => None,
        }
    }
}

/// `requested == 0` selects `0..total`; otherwise the single zero-based
/// index `requested - 1`, or nothing when it is past the end.
pub fn select_pages(requested: usize, total: usize) -> Vec<usize> {
    match requested {
        0 => (0..total).collect(),
        page if page <= total => vec![page - 1],
        _ => Vec::new(),
    }
}

/// Parses the optional positional page argument.
///
/// Anything other than a positive integer is an error; the caller decides
/// what to fall back to.
pub fn parse_page_arg(arg: Option<&str>) -> Result<PageSelection, ConvertError> {
    let Some(raw) = arg else {
        return Ok(PageSelection::All);
    };

    match raw.trim().parse::<i64>() {
        Ok(page) if page >= 1 => Ok(PageSelection::from_requested(page as usize)),
        _ => Err(ConvertError::InvalidPage(raw.to_string())),
    }
}
