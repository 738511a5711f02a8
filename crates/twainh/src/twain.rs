// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TWAIN header definitions as `#[repr(C)]` Rust types.
//!
//! These mirror `twain.h` (protocol 2.4) closely enough that `size_of` and
//! `offset_of!` on them give the layout a C compiler produces for the header
//! on the same target. Nothing here is ever instantiated; the types exist to
//! be measured.
//!
//! # Packing
//!
//! The header sets `#pragma pack(2)` for MSC and GNU compilers and
//! `#pragma options align=power` on Apple. On Apple targets the structs use
//! plain `repr(C)` (natural alignment); everywhere else `repr(C, packed(2))`.
//!
//! Anonymous unions in the header become named union fields here. Their
//! members are published under the header's member names, so the union field
//! names below never reach the layout table.

#![allow(non_camel_case_types, non_snake_case)]

use std::os::raw::{c_char, c_int, c_void};

/// Applies the header's packing rule and `Clone`/`Copy` to each item.
macro_rules! twain_packed {
    ($($item:item)*) => {
        $(
            #[cfg_attr(any(target_os = "macos", target_os = "ios"), repr(C))]
            #[cfg_attr(not(any(target_os = "macos", target_os = "ios")), repr(C, packed(2)))]
            #[derive(Clone, Copy)]
            $item
        )*
    };
}

// =============================================================================
// Platform dependent typedefs
// =============================================================================

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub type TW_HANDLE = *mut c_void;
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub type TW_MEMREF = *mut c_void;

/// Carbon `Handle` (`char **`).
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type TW_HANDLE = *mut *mut c_char;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type TW_MEMREF = *mut c_char;

/// `UINT_PTR` on Windows, `uintptr_t` elsewhere.
pub type TW_UINTPTR = usize;

/// Element type of the string typedefs (`unsigned char` on Apple).
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub type TW_CHAR = c_char;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type TW_CHAR = u8;

// =============================================================================
// Type definitions
// =============================================================================

/// String types. Sizes include room for a terminating NUL and keep even
/// alignment.
pub type TW_STR32 = [TW_CHAR; 34];
pub type TW_STR64 = [TW_CHAR; 66];
pub type TW_STR128 = [TW_CHAR; 130];
pub type TW_STR255 = [TW_CHAR; 256];

pub type TW_INT8 = c_char;
pub type TW_INT16 = i16;
pub type TW_INT32 = i32;

pub type TW_UINT8 = u8;
pub type TW_UINT16 = u16;
pub type TW_UINT32 = u32;
pub type TW_BOOL = u16;

pub type pTW_IDENTITY = *mut TW_IDENTITY;

// =============================================================================
// Entry point signatures
// =============================================================================

pub type DSMENTRYPROC = Option<
    unsafe extern "system" fn(
        pTW_IDENTITY,
        pTW_IDENTITY,
        TW_UINT32,
        TW_UINT16,
        TW_UINT16,
        TW_MEMREF,
    ) -> TW_UINT16,
>;
pub type DSM_MEMALLOCATE = Option<unsafe extern "system" fn(TW_UINT32) -> TW_HANDLE>;
pub type DSM_MEMFREE = Option<unsafe extern "system" fn(TW_HANDLE)>;
pub type DSM_MEMLOCK = Option<unsafe extern "system" fn(TW_HANDLE) -> TW_MEMREF>;
pub type DSM_MEMUNLOCK = Option<unsafe extern "system" fn(TW_HANDLE)>;

// =============================================================================
// Structure definitions
// =============================================================================

twain_packed! {
    /// Fixed point structure type.
    pub struct TW_FIX32 {
        pub Whole: TW_INT16,
        pub Frac: TW_UINT16,
    }

    /// Defines a frame rectangle in ICAP_UNITS coordinates.
    pub struct TW_FRAME {
        pub Left: TW_FIX32,
        pub Top: TW_FIX32,
        pub Right: TW_FIX32,
        pub Bottom: TW_FIX32,
    }

    /// Defines the parameters used for channel-specific transformation.
    pub struct TW_DECODEFUNCTION {
        pub StartIn: TW_FIX32,
        pub BreakIn: TW_FIX32,
        pub EndIn: TW_FIX32,
        pub StartOut: TW_FIX32,
        pub BreakOut: TW_FIX32,
        pub EndOut: TW_FIX32,
        pub Gamma: TW_FIX32,
        pub SampleCount: TW_FIX32,
    }

    pub struct TW_TRANSFORMSTAGE {
        pub Decode: [TW_DECODEFUNCTION; 3],
        pub Mix: [[TW_FIX32; 3]; 3],
    }

    /// Container for array of values.
    pub struct TW_ARRAY {
        pub ItemType: TW_UINT16,
        pub NumItems: TW_UINT32,
        pub ItemList: [TW_UINT8; 1],
    }

    /// Information about audio data.
    pub struct TW_AUDIOINFO {
        pub Name: TW_STR255,
        pub Reserved: TW_UINT32,
    }

    /// Used to register callbacks.
    pub struct TW_CALLBACK {
        pub CallBackProc: TW_MEMREF,
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        pub RefCon: TW_MEMREF,
        #[cfg(not(any(target_os = "macos", target_os = "ios")))]
        pub RefCon: TW_UINT32,
        pub Message: TW_INT16,
    }

    pub struct TW_CALLBACK2 {
        pub CallBackProc: TW_MEMREF,
        pub RefCon: TW_UINTPTR,
        pub Message: TW_INT16,
    }

    /// Used by application to get/set capability from/in a data source.
    pub struct TW_CAPABILITY {
        pub Cap: TW_UINT16,
        pub ConType: TW_UINT16,
        pub hContainer: TW_HANDLE,
    }

    /// Defines a CIE XYZ space tri-stimulus value.
    pub struct TW_CIEPOINT {
        pub X: TW_FIX32,
        pub Y: TW_FIX32,
        pub Z: TW_FIX32,
    }

    /// Defines the mapping from an RGB color space device into CIE 1931 (XYZ).
    pub struct TW_CIECOLOR {
        pub ColorSpace: TW_UINT16,
        pub LowEndian: TW_INT16,
        pub DeviceDependent: TW_INT16,
        pub VersionNumber: TW_INT32,
        pub StageABC: TW_TRANSFORMSTAGE,
        pub StageLMN: TW_TRANSFORMSTAGE,
        pub WhitePoint: TW_CIEPOINT,
        pub BlackPoint: TW_CIEPOINT,
        pub WhitePaper: TW_CIEPOINT,
        pub BlackInk: TW_CIEPOINT,
        pub Samples: [TW_FIX32; 1],
    }

    /// Custom data passed between a data source and an application.
    pub struct TW_CUSTOMDSDATA {
        pub InfoLength: TW_UINT32,
        pub hData: TW_HANDLE,
    }

    /// Information about an event raised by the source.
    pub struct TW_DEVICEEVENT {
        pub Event: TW_UINT32,
        pub DeviceName: TW_STR255,
        pub BatteryMinutes: TW_UINT32,
        pub BatteryPercentage: TW_INT16,
        pub PowerSupply: TW_INT32,
        pub XResolution: TW_FIX32,
        pub YResolution: TW_FIX32,
        pub FlashUsed2: TW_UINT32,
        pub AutomaticCapture: TW_UINT32,
        pub TimeBeforeFirstCapture: TW_UINT32,
        pub TimeBetweenCaptures: TW_UINT32,
    }

    /// Tri-stimulus color palette entry for TW_PALETTE8.
    pub struct TW_ELEMENT8 {
        pub Index: TW_UINT8,
        pub Channel1: TW_UINT8,
        pub Channel2: TW_UINT8,
        pub Channel3: TW_UINT8,
    }

    /// Stores a group of individual values describing a capability.
    pub struct TW_ENUMERATION {
        pub ItemType: TW_UINT16,
        pub NumItems: TW_UINT32,
        pub CurrentIndex: TW_UINT32,
        pub DefaultIndex: TW_UINT32,
        pub ItemList: [TW_UINT8; 1],
    }

    /// Passes application events/messages to the source.
    pub struct TW_EVENT {
        pub pEvent: TW_MEMREF,
        pub TWMessage: TW_UINT16,
    }

    pub union TW_INFO_CODE {
        pub ReturnCode: TW_UINT16,
        /// Deprecated.
        pub CondCode: TW_UINT16,
    }

    /// One extended image information entry.
    pub struct TW_INFO {
        pub InfoID: TW_UINT16,
        pub ItemType: TW_UINT16,
        pub NumItems: TW_UINT16,
        pub Code: TW_INFO_CODE,
        pub Item: TW_UINTPTR,
    }

    pub struct TW_EXTIMAGEINFO {
        pub NumInfos: TW_UINT32,
        pub Info: [TW_INFO; 1],
    }

    pub union TW_FILESYSTEM_SUBDIRS {
        pub Recursive: c_int,
        pub Subdirectories: TW_BOOL,
    }

    pub union TW_FILESYSTEM_FILETYPE {
        pub FileType: TW_INT32,
        pub FileSystemType: TW_UINT32,
    }

    /// Information about the currently selected device.
    pub struct TW_FILESYSTEM {
        pub InputName: TW_STR255,
        pub OutputName: TW_STR255,
        pub Context: TW_MEMREF,
        pub Subdirs: TW_FILESYSTEM_SUBDIRS,
        pub Kind: TW_FILESYSTEM_FILETYPE,
        pub Size: TW_UINT32,
        pub CreateTimeDate: TW_STR32,
        pub ModifiedTimeDate: TW_STR32,
        pub FreeSpace: TW_UINT32,
        pub NewImageSize: TW_INT32,
        pub NumberOfFiles: TW_UINT32,
        pub NumberOfSnippets: TW_UINT32,
        pub DeviceGroupMask: TW_UINT32,
        pub Reserved: [TW_INT8; 508],
    }

    /// Mapping values applied to grayscale data.
    pub struct TW_GRAYRESPONSE {
        pub Response: [TW_ELEMENT8; 1],
    }

    /// Version of the software that is running.
    pub struct TW_VERSION {
        pub MajorNum: TW_UINT16,
        pub MinorNum: TW_UINT16,
        pub Language: TW_UINT16,
        pub Country: TW_UINT16,
        pub Info: TW_STR32,
    }

    /// Identification information about a TWAIN entity.
    pub struct TW_IDENTITY {
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        pub Id: TW_MEMREF,
        #[cfg(not(any(target_os = "macos", target_os = "ios")))]
        pub Id: TW_UINT32,
        pub Version: TW_VERSION,
        pub ProtocolMajor: TW_UINT16,
        pub ProtocolMinor: TW_UINT16,
        pub SupportedGroups: TW_UINT32,
        pub Manufacturer: TW_STR32,
        pub ProductFamily: TW_STR32,
        pub ProductName: TW_STR32,
    }

    /// Describes the complete image being transferred.
    pub struct TW_IMAGEINFO {
        pub XResolution: TW_FIX32,
        pub YResolution: TW_FIX32,
        pub ImageWidth: TW_INT32,
        pub ImageLength: TW_INT32,
        pub SamplesPerPixel: TW_INT16,
        pub BitsPerSample: [TW_INT16; 8],
        pub BitsPerPixel: TW_INT16,
        pub Planar: TW_BOOL,
        pub PixelType: TW_INT16,
        pub Compression: TW_UINT16,
    }

    /// Original size of the acquired image.
    pub struct TW_IMAGELAYOUT {
        pub Frame: TW_FRAME,
        pub DocumentNumber: TW_UINT32,
        pub PageNumber: TW_UINT32,
        pub FrameNumber: TW_UINT32,
    }

    /// Memory buffer descriptor.
    pub struct TW_MEMORY {
        pub Flags: TW_UINT32,
        pub Length: TW_UINT32,
        pub TheMem: TW_MEMREF,
    }

    /// Form of the data passed in a buffered memory transfer.
    pub struct TW_IMAGEMEMXFER {
        pub Compression: TW_UINT16,
        pub BytesPerRow: TW_UINT32,
        pub Columns: TW_UINT32,
        pub Rows: TW_UINT32,
        pub XOffset: TW_UINT32,
        pub YOffset: TW_UINT32,
        pub BytesWritten: TW_UINT32,
        pub Memory: TW_MEMORY,
    }

    /// Parameters of a JPEG-compressed transfer.
    pub struct TW_JPEGCOMPRESSION {
        pub ColorSpace: TW_UINT16,
        pub SubSampling: TW_UINT32,
        pub NumComponents: TW_UINT16,
        pub RestartFrequency: TW_UINT16,
        pub QuantMap: [TW_UINT16; 4],
        pub QuantTable: [TW_MEMORY; 4],
        pub HuffmanMap: [TW_UINT16; 4],
        pub HuffmanDC: [TW_MEMORY; 2],
        pub HuffmanAC: [TW_MEMORY; 2],
    }

    /// Scanning metrics collected after returning to state 4.
    pub struct TW_METRICS {
        pub SizeOf: TW_UINT32,
        pub ImageCount: TW_UINT32,
        pub SheetCount: TW_UINT32,
    }

    /// Single value container.
    pub struct TW_ONEVALUE {
        pub ItemType: TW_UINT16,
        pub Item: TW_UINT32,
    }

    pub struct TW_PALETTE8 {
        pub NumColors: TW_UINT16,
        pub PaletteType: TW_UINT16,
        pub Colors: [TW_ELEMENT8; 256],
    }

    /// Raw command passthrough to the device.
    pub struct TW_PASSTHRU {
        pub pCommand: TW_MEMREF,
        pub CommandBytes: TW_UINT32,
        pub Direction: TW_INT32,
        pub pData: TW_MEMREF,
        pub DataBytes: TW_UINT32,
        pub DataBytesXfered: TW_UINT32,
    }

    pub union TW_JOBCONTROL {
        pub EOJ: TW_UINT32,
        pub Reserved: TW_UINT32,
    }

    /// Number of complete transfers the source still has available.
    pub struct TW_PENDINGXFERS {
        pub Count: TW_UINT16,
        pub JobControl: TW_JOBCONTROL,
    }

    /// Range container.
    pub struct TW_RANGE {
        pub ItemType: TW_UINT16,
        pub MinValue: TW_UINT32,
        pub MaxValue: TW_UINT32,
        pub StepSize: TW_UINT32,
        pub DefaultValue: TW_UINT32,
        pub CurrentValue: TW_UINT32,
    }

    pub struct TW_RGBRESPONSE {
        pub Response: [TW_ELEMENT8; 1],
    }

    /// File format and file name for a disk file transfer.
    pub struct TW_SETUPFILEXFER {
        pub FileName: TW_STR255,
        pub Format: TW_UINT16,
        pub VRefNum: TW_INT16,
    }

    /// Source buffer size requirements for memory transfers.
    pub struct TW_SETUPMEMXFER {
        pub MinBufSize: TW_UINT32,
        pub MaxBufSize: TW_UINT32,
        pub Preferred: TW_UINT32,
    }

    pub union TW_STATUS_DETAIL {
        pub Data: TW_UINT16,
        pub Reserved: TW_UINT16,
    }

    /// Status of a source.
    pub struct TW_STATUS {
        pub ConditionCode: TW_UINT16,
        pub Detail: TW_STATUS_DETAIL,
    }

    /// Localized UTF-8 text for a TW_STATUS.
    pub struct TW_STATUSUTF8 {
        pub Status: TW_STATUS,
        pub Size: TW_UINT32,
        pub UTF8string: TW_HANDLE,
    }

    pub struct TW_TWAINDIRECT {
        pub SizeOf: TW_UINT32,
        pub CommunicationManager: TW_UINT16,
        pub Send: TW_HANDLE,
        pub SendSize: TW_UINT32,
        pub Receive: TW_HANDLE,
        pub ReceiveSize: TW_UINT32,
    }

    /// User interface coordination between application and source.
    pub struct TW_USERINTERFACE {
        pub ShowUI: TW_BOOL,
        pub ModalUI: TW_BOOL,
        pub hParent: TW_HANDLE,
    }

    /// DAT_ENTRYPOINT. Essential DSM entry points.
    pub struct TW_ENTRYPOINT {
        pub Size: TW_UINT32,
        pub DSM_Entry: DSMENTRYPROC,
        pub DSM_MemAllocate: DSM_MEMALLOCATE,
        pub DSM_MemFree: DSM_MEMFREE,
        pub DSM_MemLock: DSM_MEMLOCK,
        pub DSM_MemUnlock: DSM_MEMUNLOCK,
    }

    /// DAT_FILTER descriptor.
    pub struct TW_FILTER_DESCRIPTOR {
        pub Size: TW_UINT32,
        pub HueStart: TW_UINT32,
        pub HueEnd: TW_UINT32,
        pub SaturationStart: TW_UINT32,
        pub SaturationEnd: TW_UINT32,
        pub ValueStart: TW_UINT32,
        pub ValueEnd: TW_UINT32,
        pub Replacement: TW_UINT32,
    }

    /// DAT_FILTER.
    pub struct TW_FILTER {
        pub Size: TW_UINT32,
        pub DescriptorCount: TW_UINT32,
        pub MaxDescriptorCount: TW_UINT32,
        pub Condition: TW_UINT32,
        pub hDescriptors: TW_HANDLE,
    }
}
