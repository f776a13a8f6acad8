//! Just enough PE parsing to tell windowed programs from console ones.
//!
//! Only the DOS stub pointer, the NT signature, the COFF header and the
//! first 70 bytes of the optional header are read; sections, imports and
//! resources are never touched.

use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use crate::error::{InstallError, InstallResult};

const DOS_MAGIC: &[u8; 2] = b"MZ";
const E_LFANEW_OFFSET: u64 = 0x3c;
const PE_SIGNATURE: &[u8; 4] = b"PE\0\0";
const COFF_HEADER_LEN: usize = 20;
const SIZE_OF_OPTIONAL_HEADER_OFFSET: usize = 16;
const PE32_MAGIC: u16 = 0x10b;
const PE32_PLUS_MAGIC: u16 = 0x20b;
const SUBSYSTEM_OFFSET: usize = 68;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Native,
    WindowsGui,
    WindowsCui,
    Os2Cui,
    PosixCui,
    WindowsCeGui,
    EfiApplication,
    Other(u16),
}

impl From<u16> for Subsystem {
    fn from(value: u16) -> Self {
        match value {
            1 => Subsystem::Native,
            2 => Subsystem::WindowsGui,
            3 => Subsystem::WindowsCui,
            5 => Subsystem::Os2Cui,
            7 => Subsystem::PosixCui,
            9 => Subsystem::WindowsCeGui,
            10 => Subsystem::EfiApplication,
            other => Subsystem::Other(other),
        }
    }
}

impl Subsystem {
    pub fn is_gui(self) -> bool {
        self == Subsystem::WindowsGui
    }
}

pub fn read_subsystem(path: &Path) -> InstallResult<Subsystem> {
    let mut file = File::open(path).map_err(|err| InstallError::io(path, err))?;
    parse_subsystem(&mut file).map_err(|reason| InstallError::header(path, reason))
}

pub fn parse_subsystem<R: Read + Seek>(reader: &mut R) -> Result<Subsystem, String> {
    let mut magic = [0u8; 2];
    read_at(reader, 0, &mut magic)?;
    if &magic != DOS_MAGIC {
        return Err("missing MZ signature".to_string());
    }

    let mut lfanew = [0u8; 4];
    read_at(reader, E_LFANEW_OFFSET, &mut lfanew)?;
    let nt_offset = u64::from(u32::from_le_bytes(lfanew));

    let mut nt = [0u8; 4 + COFF_HEADER_LEN];
    read_at(reader, nt_offset, &mut nt)?;
    if &nt[..4] != PE_SIGNATURE {
        return Err("missing PE signature".to_string());
    }
    let coff = &nt[4..];
    let optional_len = usize::from(u16::from_le_bytes([
        coff[SIZE_OF_OPTIONAL_HEADER_OFFSET],
        coff[SIZE_OF_OPTIONAL_HEADER_OFFSET + 1],
    ]));
    if optional_len < SUBSYSTEM_OFFSET + 2 {
        return Err(format!("optional header too small ({optional_len} bytes)"));
    }

    let mut optional = [0u8; SUBSYSTEM_OFFSET + 2];
    read_at(reader, nt_offset + nt.len() as u64, &mut optional)?;
    let magic = u16::from_le_bytes([optional[0], optional[1]]);
    if magic != PE32_MAGIC && magic != PE32_PLUS_MAGIC {
        return Err(format!("unknown optional header magic {magic:#x}"));
    }

    let raw = u16::from_le_bytes([optional[SUBSYSTEM_OFFSET], optional[SUBSYSTEM_OFFSET + 1]]);
    Ok(Subsystem::from(raw))
}

fn read_at<R: Read + Seek>(reader: &mut R, offset: u64, buf: &mut [u8]) -> Result<(), String> {
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|err| format!("seek to {offset:#x}: {err}"))?;
    reader
        .read_exact(buf)
        .map_err(|_| format!("truncated header at {offset:#x}"))
}

/// Smallest image `parse_subsystem` accepts, PE32 or PE32+.
#[cfg(test)]
pub fn synthetic_image(subsystem: u16, pe32_plus: bool) -> Vec<u8> {
    let nt_offset = 0x80usize;
    let optional_len: u16 = if pe32_plus { 0xf0 } else { 0xe0 };
    let mut image = vec![0u8; nt_offset + 4 + COFF_HEADER_LEN + usize::from(optional_len)];
    image[..2].copy_from_slice(DOS_MAGIC);
    image[0x3c..0x40].copy_from_slice(&(nt_offset as u32).to_le_bytes());
    image[nt_offset..nt_offset + 4].copy_from_slice(PE_SIGNATURE);

    let coff = nt_offset + 4;
    let machine: u16 = if pe32_plus { 0x8664 } else { 0x14c };
    image[coff..coff + 2].copy_from_slice(&machine.to_le_bytes());
    image[coff + SIZE_OF_OPTIONAL_HEADER_OFFSET..coff + SIZE_OF_OPTIONAL_HEADER_OFFSET + 2]
        .copy_from_slice(&optional_len.to_le_bytes());

    let optional = coff + COFF_HEADER_LEN;
    let magic = if pe32_plus { PE32_PLUS_MAGIC } else { PE32_MAGIC };
    image[optional..optional + 2].copy_from_slice(&magic.to_le_bytes());
    image[optional + SUBSYSTEM_OFFSET..optional + SUBSYSTEM_OFFSET + 2]
        .copy_from_slice(&subsystem.to_le_bytes());
    image
}
