// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration list: every TWAIN typedef and struct member the table publishes.
//!
//! Sizes and offsets are evaluated by the compiler (`size_of`, `offset_of!`)
//! into static data. [`crate::LayoutTable::build`] walks these lists; nothing
//! else in the crate knows about individual TWAIN types.

use crate::twain::*;

/// One scalar typedef and its native size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: &'static str,
    pub size: usize,
}

/// One struct member and its native byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: &'static str,
    pub offset: usize,
}

/// One struct, its native size and its members in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructEntry {
    pub name: &'static str,
    pub size: usize,
    pub members: &'static [MemberEntry],
}

/// `scalar!(TW_BOOL)`
macro_rules! scalar {
    ($ty:ident) => {
        $crate::registry::TypeEntry {
            name: stringify!($ty),
            size: ::std::mem::size_of::<$ty>(),
        }
    };
}

/// A member is either a direct field or `Union.Member`, published as `Member`.
macro_rules! member {
    ($ty:ty, $field:ident) => {
        $crate::registry::MemberEntry {
            name: stringify!($field),
            offset: ::std::mem::offset_of!($ty, $field),
        }
    };
    ($ty:ty, $outer:ident . $field:ident) => {
        $crate::registry::MemberEntry {
            name: stringify!($field),
            offset: ::std::mem::offset_of!($ty, $outer.$field),
        }
    };
}

/// `record!(TW_FIX32 { Whole, Frac })`
macro_rules! record {
    ($ty:ident { $($path:ident $(. $field:ident)?),* $(,)? }) => {
        $crate::registry::StructEntry {
            name: stringify!($ty),
            size: ::std::mem::size_of::<$ty>(),
            members: &[$($crate::registry::member!($ty, $path $(. $field)?)),*],
        }
    };
}

#[allow(unused_imports)]
pub(crate) use {member, record, scalar};

/// Scalar typedefs.
pub static TYPES: &[TypeEntry] = &[
    scalar!(TW_HANDLE),
    scalar!(TW_MEMREF),
    scalar!(TW_UINTPTR),
    scalar!(TW_STR32),
    scalar!(TW_STR64),
    scalar!(TW_STR128),
    scalar!(TW_STR255),
    scalar!(TW_INT8),
    scalar!(TW_INT16),
    scalar!(TW_INT32),
    scalar!(TW_UINT8),
    scalar!(TW_UINT16),
    scalar!(TW_UINT32),
    scalar!(TW_BOOL),
];

/// Structs with their full member lists.
pub static STRUCTS: &[StructEntry] = &[
    record!(TW_FIX32 { Whole, Frac }),
    record!(TW_FRAME { Left, Top, Right, Bottom }),
    record!(TW_DECODEFUNCTION {
        StartIn,
        BreakIn,
        EndIn,
        StartOut,
        BreakOut,
        EndOut,
        Gamma,
        SampleCount,
    }),
    record!(TW_TRANSFORMSTAGE { Decode, Mix }),
    record!(TW_ARRAY { ItemType, NumItems, ItemList }),
    record!(TW_AUDIOINFO { Name, Reserved }),
    record!(TW_CALLBACK { CallBackProc, RefCon, Message }),
    record!(TW_CALLBACK2 { CallBackProc, RefCon, Message }),
    record!(TW_CAPABILITY { Cap, ConType, hContainer }),
    record!(TW_CIEPOINT { X, Y, Z }),
    record!(TW_CIECOLOR {
        ColorSpace,
        LowEndian,
        DeviceDependent,
        VersionNumber,
        StageABC,
        StageLMN,
        WhitePoint,
        BlackPoint,
        WhitePaper,
        BlackInk,
        Samples,
    }),
    record!(TW_CUSTOMDSDATA { InfoLength, hData }),
    record!(TW_DEVICEEVENT {
        Event,
        DeviceName,
        BatteryMinutes,
        BatteryPercentage,
        PowerSupply,
        XResolution,
        YResolution,
        FlashUsed2,
        AutomaticCapture,
        TimeBeforeFirstCapture,
        TimeBetweenCaptures,
    }),
    record!(TW_ELEMENT8 { Index, Channel1, Channel2, Channel3 }),
    record!(TW_ENUMERATION {
        ItemType,
        NumItems,
        CurrentIndex,
        DefaultIndex,
        ItemList,
    }),
    record!(TW_EVENT { pEvent, TWMessage }),
    record!(TW_INFO {
        InfoID,
        ItemType,
        NumItems,
        Code.ReturnCode,
        Code.CondCode,
        Item,
    }),
    record!(TW_EXTIMAGEINFO { NumInfos, Info }),
    record!(TW_FILESYSTEM {
        InputName,
        OutputName,
        Context,
        Subdirs.Recursive,
        Subdirs.Subdirectories,
        Kind.FileType,
        Kind.FileSystemType,
        Size,
        CreateTimeDate,
        ModifiedTimeDate,
        FreeSpace,
        NewImageSize,
        NumberOfFiles,
        NumberOfSnippets,
        DeviceGroupMask,
        Reserved,
    }),
    record!(TW_GRAYRESPONSE { Response }),
    record!(TW_VERSION { MajorNum, MinorNum, Language, Country, Info }),
    record!(TW_IDENTITY {
        Id,
        Version,
        ProtocolMajor,
        ProtocolMinor,
        SupportedGroups,
        Manufacturer,
        ProductFamily,
        ProductName,
    }),
    record!(TW_IMAGEINFO {
        XResolution,
        YResolution,
        ImageWidth,
        ImageLength,
        SamplesPerPixel,
        BitsPerSample,
        BitsPerPixel,
        Planar,
        PixelType,
        Compression,
    }),
    record!(TW_IMAGELAYOUT { Frame, DocumentNumber, PageNumber, FrameNumber }),
    record!(TW_MEMORY { Flags, Length, TheMem }),
    record!(TW_IMAGEMEMXFER {
        Compression,
        BytesPerRow,
        Columns,
        Rows,
        XOffset,
        YOffset,
        BytesWritten,
        Memory,
    }),
    record!(TW_JPEGCOMPRESSION {
        ColorSpace,
        SubSampling,
        NumComponents,
        RestartFrequency,
        QuantMap,
        QuantTable,
        HuffmanMap,
        HuffmanDC,
        HuffmanAC,
    }),
    record!(TW_METRICS { SizeOf, ImageCount, SheetCount }),
    record!(TW_ONEVALUE { ItemType, Item }),
    record!(TW_PALETTE8 { NumColors, PaletteType, Colors }),
    record!(TW_PASSTHRU {
        pCommand,
        CommandBytes,
        Direction,
        pData,
        DataBytes,
        DataBytesXfered,
    }),
    record!(TW_PENDINGXFERS { Count, JobControl.EOJ, JobControl.Reserved }),
    record!(TW_RANGE {
        ItemType,
        MinValue,
        MaxValue,
        StepSize,
        DefaultValue,
        CurrentValue,
    }),
    record!(TW_RGBRESPONSE { Response }),
    record!(TW_SETUPFILEXFER { FileName, Format, VRefNum }),
    record!(TW_SETUPMEMXFER { MinBufSize, MaxBufSize, Preferred }),
    record!(TW_STATUS { ConditionCode, Detail.Data, Detail.Reserved }),
    record!(TW_STATUSUTF8 { Status, Size, UTF8string }),
    record!(TW_TWAINDIRECT {
        SizeOf,
        CommunicationManager,
        Send,
        SendSize,
        Receive,
        ReceiveSize,
    }),
    record!(TW_USERINTERFACE { ShowUI, ModalUI, hParent }),
    record!(TW_ENTRYPOINT {
        Size,
        DSM_Entry,
        DSM_MemAllocate,
        DSM_MemFree,
        DSM_MemLock,
        DSM_MemUnlock,
    }),
    record!(TW_FILTER_DESCRIPTOR {
        Size,
        HueStart,
        HueEnd,
        SaturationStart,
        SaturationEnd,
        ValueStart,
        ValueEnd,
        Replacement,
    }),
    record!(TW_FILTER {
        Size,
        DescriptorCount,
        MaxDescriptorCount,
        Condition,
        hDescriptors,
    }),
];
